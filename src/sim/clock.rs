use anyhow::{Result, ensure};
use glam::DVec2;

use super::body::{Body, step_bodies};

pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 1.0e10;

#[derive(Clone, Debug)]
pub struct SimulationClock {
    fixed_step: f64,
    accumulated: f64,
    speed: f64,
    paused: bool,
    time_passed: f64,
    max_steps_per_frame: Option<usize>,
    forces: Vec<DVec2>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSteps {
    pub executed: usize,
    pub dropped: usize,
}

impl SimulationClock {
    pub fn new(fixed_step: f64, speed: f64, max_steps_per_frame: Option<usize>) -> Result<Self> {
        ensure!(
            fixed_step.is_finite() && fixed_step > 0.0,
            "fixed step must be positive, got {fixed_step}"
        );
        ensure!(
            speed_in_range(speed),
            "simulation speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"
        );

        Ok(Self {
            fixed_step,
            accumulated: 0.0,
            speed,
            paused: false,
            time_passed: 0.0,
            max_steps_per_frame: max_steps_per_frame.filter(|cap| *cap > 0),
            forces: Vec::new(),
        })
    }

    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_passed(&self) -> f64 {
        self.time_passed
    }

    pub fn max_steps_per_frame(&self) -> Option<usize> {
        self.max_steps_per_frame
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Out-of-range speeds leave the current one in place and return `false`.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed_in_range(speed) {
            return false;
        }
        self.speed = speed;
        true
    }

    pub fn double_speed(&mut self) -> bool {
        self.set_speed(self.speed * 2.0)
    }

    pub fn halve_speed(&mut self) -> bool {
        self.set_speed(self.speed / 2.0)
    }

    /// Feeds `elapsed_wall_seconds` into the accumulator and runs every whole fixed step
    /// it now holds. While paused the whole steps are discarded instead of simulated, and
    /// past the step cap the rest of the backlog is discarded the same way.
    pub fn advance(&mut self, elapsed_wall_seconds: f64, bodies: &mut [Body]) -> FrameSteps {
        if !elapsed_wall_seconds.is_finite() || elapsed_wall_seconds <= 0.0 {
            return FrameSteps::default();
        }

        let elapsed = elapsed_wall_seconds * self.speed;
        self.time_passed += elapsed;
        self.accumulated += elapsed;

        if self.paused {
            self.accumulated %= self.fixed_step;
            return FrameSteps::default();
        }

        let whole = (self.accumulated / self.fixed_step).floor();
        if whole < 1.0 {
            return FrameSteps::default();
        }
        self.accumulated %= self.fixed_step;

        // Float-to-int casts saturate, so an absurd backlog still yields a finite count.
        let backlog = whole as usize;
        let executed = self
            .max_steps_per_frame
            .map_or(backlog, |cap| backlog.min(cap));
        if !bodies.is_empty() {
            for _ in 0..executed {
                step_bodies(bodies, &mut self.forces, self.fixed_step);
            }
        }
        let steps = FrameSteps {
            executed,
            dropped: backlog - executed,
        };

        if steps.dropped > 0 {
            log::warn!(
                "frame backlog exceeded {} physics steps; skipped {} steps of simulated time",
                steps.executed,
                steps.dropped
            );
        }

        steps
    }
}

fn speed_in_range(speed: f64) -> bool {
    (MIN_SPEED..=MAX_SPEED).contains(&speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<Body> {
        vec![
            Body::new("sun", 1.989e30, 6.9634e8, DVec2::ZERO, DVec2::ZERO, [255, 204, 0]).unwrap(),
            Body::new(
                "earth",
                5.972e24,
                6.371e6,
                DVec2::new(14_960.0, 0.0),
                DVec2::new(0.0, 29_780.0),
                [59, 92, 154],
            )
            .unwrap(),
        ]
    }

    #[test]
    fn construction_rejects_non_positive_step_and_speed() {
        assert!(SimulationClock::new(0.0, 1.0, None).is_err());
        assert!(SimulationClock::new(-3600.0, 1.0, None).is_err());
        assert!(SimulationClock::new(3600.0, 0.0, None).is_err());
        assert!(SimulationClock::new(f64::NAN, 1.0, None).is_err());
    }

    #[test]
    fn runs_whole_steps_and_keeps_the_remainder() {
        let mut clock = SimulationClock::new(3600.0, 3600.0, None).unwrap();
        let mut bodies = pair();

        assert_eq!(clock.advance(2.5, &mut bodies).executed, 2);
        assert_eq!(clock.accumulated(), 1800.0);
        assert_eq!(clock.advance(0.5, &mut bodies).executed, 1);
        assert_eq!(clock.accumulated(), 0.0);
        assert_eq!(clock.advance(0.25, &mut bodies).executed, 0);
        assert!(clock.accumulated() < clock.fixed_step());
    }

    #[test]
    fn split_frames_match_a_single_frame() {
        let mut whole_clock = SimulationClock::new(3600.0, 3600.0, None).unwrap();
        let mut split_clock = whole_clock.clone();
        let mut whole = pair();
        let mut split = pair();

        let whole_steps = whole_clock.advance(10.0, &mut whole).executed;
        let split_steps = split_clock.advance(5.0, &mut split).executed
            + split_clock.advance(5.0, &mut split).executed;

        assert_eq!(whole_steps, 10);
        assert_eq!(whole_steps, split_steps);
        for (a, b) in whole.iter().zip(&split) {
            assert_eq!(a.position(), b.position());
            assert_eq!(a.velocity(), b.velocity());
        }
    }

    #[test]
    fn paused_clock_never_moves_bodies() {
        let mut clock = SimulationClock::new(3600.0, 3600.0, None).unwrap();
        clock.set_paused(true);
        let mut bodies = pair();
        let initial = pair();

        for elapsed in [0.016, 1.0, 250.0, 1.0e6] {
            assert_eq!(clock.advance(elapsed, &mut bodies).executed, 0);
        }

        for (body, start) in bodies.iter().zip(&initial) {
            assert_eq!(body.position(), start.position());
            assert_eq!(body.velocity(), start.velocity());
        }
        assert!(clock.accumulated() < clock.fixed_step());
        assert!(clock.time_passed() > 1.0e9);
    }

    #[test]
    fn resuming_does_not_catch_up() {
        let mut clock = SimulationClock::new(3600.0, 3600.0, None).unwrap();
        let mut bodies = pair();
        clock.set_paused(true);
        clock.advance(100.0, &mut bodies);
        clock.set_paused(false);

        assert_eq!(clock.advance(1.0, &mut bodies).executed, 1);
    }

    #[test]
    fn step_cap_drops_the_backlog() {
        let mut clock = SimulationClock::new(3600.0, 3600.0, Some(4)).unwrap();
        let mut bodies = pair();

        let steps = clock.advance(10.0, &mut bodies);
        assert_eq!(steps, FrameSteps { executed: 4, dropped: 6 });
        assert_eq!(clock.accumulated(), 0.0);
    }

    #[test]
    fn zero_cap_means_uncapped() {
        let clock = SimulationClock::new(3600.0, 1.0, Some(0)).unwrap();
        assert_eq!(clock.max_steps_per_frame(), None);
    }

    #[test]
    fn construction_rejects_speeds_outside_the_range() {
        assert!(SimulationClock::new(3600.0, 0.25, None).is_err());
        assert!(SimulationClock::new(3600.0, MAX_SPEED * 2.0, None).is_err());
        assert!(SimulationClock::new(3600.0, f64::INFINITY, None).is_err());
        assert_eq!(SimulationClock::new(3600.0, MIN_SPEED, None).unwrap().speed(), MIN_SPEED);
    }

    #[test]
    fn speed_stays_positive_and_bounded() {
        let mut clock = SimulationClock::new(3600.0, 4.0, None).unwrap();
        while clock.halve_speed() {}
        assert_eq!(clock.speed(), MIN_SPEED);

        while clock.double_speed() {}
        assert!(clock.speed() <= MAX_SPEED);
        assert!(clock.speed() * 2.0 > MAX_SPEED);

        assert!(!clock.set_speed(-5.0));
        assert!(!clock.set_speed(0.5));
        assert!(clock.speed() * 2.0 > MAX_SPEED);
    }

    #[test]
    fn halving_then_doubling_restores_the_speed() {
        let mut clock = SimulationClock::new(3600.0, 1.5, None).unwrap();
        assert!(!clock.halve_speed());
        assert_eq!(clock.speed(), 1.5);

        assert!(clock.double_speed());
        assert!(clock.halve_speed());
        assert_eq!(clock.speed(), 1.5);
    }

    #[test]
    fn uncapped_huge_backlog_terminates() {
        let mut clock = SimulationClock::new(1.0, MAX_SPEED, None).unwrap();
        let mut bodies: Vec<Body> = Vec::new();

        let steps = clock.advance(1.0e7, &mut bodies);

        assert_eq!(steps.executed as f64, 1.0e17);
        assert_eq!(steps.dropped, 0);
        assert!(clock.accumulated() < clock.fixed_step());
    }
}
