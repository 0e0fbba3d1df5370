mod body;
mod clock;
mod force;
mod viewport;

use anyhow::{Result, ensure};
use glam::DVec2;

pub use body::{Body, BodyId};
pub use clock::{FrameSteps, SimulationClock};
pub use force::WORLD_SCALE;
pub use viewport::{GridLines, Indicator, Viewport, ZoomDirection};

pub struct Simulation {
    bodies: Vec<Body>,
    clock: SimulationClock,
    viewport: Viewport,
    follow: Option<BodyId>,
    grid_spacing: f64,
}

impl Simulation {
    pub fn new(
        bodies: Vec<Body>,
        clock: SimulationClock,
        viewport: Viewport,
        grid_spacing: f64,
    ) -> Result<Self> {
        ensure!(!bodies.is_empty(), "a simulation needs at least one body");
        ensure!(
            grid_spacing.is_finite() && grid_spacing > 0.0,
            "grid spacing must be positive, got {grid_spacing}"
        );

        Ok(Self {
            bodies,
            clock,
            viewport,
            follow: None,
            grid_spacing,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn body_ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn follow_target(&self) -> Option<BodyId> {
        self.follow
    }

    /// Drains the clock for `elapsed_wall_seconds`, then recenters on the follow target
    /// using its freshly integrated position.
    pub fn advance_frame(&mut self, elapsed_wall_seconds: f64) -> FrameSteps {
        let steps = self.clock.advance(elapsed_wall_seconds, &mut self.bodies);
        self.recenter_on_follow_target();
        steps
    }

    fn recenter_on_follow_target(&mut self) {
        let Some(position) = self
            .follow
            .and_then(|id| self.bodies.get(id.0))
            .map(Body::position)
        else {
            return;
        };

        let pan = self.viewport.center_on_screen(position);
        self.viewport.set_pan_offset(pan);
    }

    pub fn follow(&mut self, target: Option<BodyId>) {
        let target = target.filter(|id| id.0 < self.bodies.len());
        if self.follow == target {
            return;
        }

        match target.and_then(|id| self.body(id)) {
            Some(body) => log::debug!("following {}", body.name()),
            None => log::debug!("follow cleared"),
        }
        self.follow = target;
    }

    pub fn pan(&mut self, delta: DVec2) {
        self.viewport.pan(delta);
        self.follow(None);
    }

    pub fn zoom_at(&mut self, cursor: DVec2, direction: ZoomDirection, modifier_held: bool) {
        self.viewport.zoom_at(cursor, direction, modifier_held);
    }

    /// Returns whether the viewport took the new size.
    pub fn resize(&mut self, new_size: DVec2) -> bool {
        if new_size == self.viewport.screen_size() || !self.viewport.resize(new_size) {
            return false;
        }
        log::debug!("viewport resized to {}x{}", new_size.x, new_size.y);
        true
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_to_default();
        self.follow(None);
    }

    pub fn hovered(&self, screen_point: DVec2) -> Vec<BodyId> {
        self.body_ids()
            .filter(|id| self.viewport.is_hovering(screen_point, &self.bodies[id.0]))
            .collect()
    }

    /// Follows the last body under `screen_point`, or clears the follow target if none.
    pub fn click(&mut self, screen_point: DVec2) {
        let picked = self.hovered(screen_point).last().copied();
        self.follow(picked);
    }

    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    pub fn grid_lines(&self) -> GridLines {
        self.viewport.grid_lines(self.grid_spacing)
    }

    pub fn body_on_screen(&self, id: BodyId) -> Option<DVec2> {
        self.body(id)
            .and_then(|body| self.viewport.world_to_screen(body.position(), false))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::force::G;
    use super::*;

    const SUN_MASS: f64 = 1.989e30;
    const EARTH_MASS: f64 = 5.972e24;
    const EARTH_DISTANCE: f64 = 1.496e11;
    const EARTH_SPEED: f64 = 29_780.0;

    fn sun_and_earth(speed: f64) -> Simulation {
        let bodies = vec![
            Body::new("Sun", SUN_MASS, 696_340_000.0, DVec2::ZERO, DVec2::ZERO, [255, 204, 0])
                .unwrap(),
            Body::new(
                "Earth",
                EARTH_MASS,
                6_371_000.0,
                DVec2::new(EARTH_DISTANCE / WORLD_SCALE, 0.0),
                DVec2::new(0.0, EARTH_SPEED),
                [59, 92, 154],
            )
            .unwrap(),
        ];
        let clock = SimulationClock::new(3600.0, speed, None).unwrap();
        let viewport = Viewport::new(DVec2::new(800.0, 600.0));
        Simulation::new(bodies, clock, viewport, 100_000.0).unwrap()
    }

    fn relative(sim: &Simulation) -> (DVec2, DVec2) {
        let sun = &sim.bodies()[0];
        let earth = &sim.bodies()[1];
        (
            (earth.position() - sun.position()) * WORLD_SCALE,
            earth.velocity() - sun.velocity(),
        )
    }

    #[test]
    fn rejects_empty_collections_and_bad_grid_spacing() {
        let clock = SimulationClock::new(3600.0, 1.0, None).unwrap();
        let viewport = Viewport::new(DVec2::new(800.0, 600.0));
        assert!(Simulation::new(Vec::new(), clock.clone(), viewport.clone(), 1.0).is_err());

        let sun = Body::new("Sun", 1.0, 1.0, DVec2::ZERO, DVec2::ZERO, [0; 3]).unwrap();
        assert!(Simulation::new(vec![sun], clock, viewport, 0.0).is_err());
    }

    #[test]
    fn earth_closes_its_orbit_after_one_year() {
        let mut sim = sun_and_earth(3600.0);
        let (start, _) = relative(&sim);

        let mu = G * (SUN_MASS + EARTH_MASS);
        let semi_major = 1.0 / (2.0 / EARTH_DISTANCE - EARTH_SPEED * EARTH_SPEED / mu);
        let period = TAU * (semi_major.powi(3) / mu).sqrt();
        let angular_momentum = EARTH_DISTANCE * EARTH_SPEED;
        let energy = EARTH_SPEED * EARTH_SPEED / 2.0 - mu / EARTH_DISTANCE;
        let eccentricity =
            (1.0 + 2.0 * energy * angular_momentum * angular_momentum / (mu * mu)).sqrt();
        let max_speed = mu * (1.0 + eccentricity) / angular_momentum;
        let min_speed = mu * (1.0 - eccentricity) / angular_momentum;

        let steps = (period / 3600.0).round() as usize;
        for _ in 0..steps {
            assert_eq!(sim.advance_frame(1.0).executed, 1);
            let (_, velocity) = relative(&sim);
            let speed = velocity.length();
            assert!(speed <= max_speed * 1.01, "speed {speed} above aphelion bound");
            assert!(speed >= min_speed * 0.99, "speed {speed} below perihelion bound");
        }

        let (end, _) = relative(&sim);
        assert!(
            (end - start).length() < EARTH_DISTANCE * 0.01,
            "orbit missed its start by {} m",
            (end - start).length()
        );
    }

    #[test]
    fn following_recenters_every_frame() {
        let mut sim = sun_and_earth(3600.0 * 24.0);
        let earth = BodyId(1);
        sim.follow(Some(earth));

        for _ in 0..3 {
            sim.advance_frame(1.0 / 60.0);
            sim.advance_frame(1.0);
            let position = sim.body(earth).unwrap().position();
            let screen = sim.viewport().world_to_screen(position, false).unwrap();
            assert!((screen - sim.viewport().screen_center()).length() < 1e-6);
        }
    }

    #[test]
    fn dragging_and_resetting_release_the_follow_target() {
        let mut sim = sun_and_earth(3600.0);
        sim.follow(Some(BodyId(1)));
        sim.pan(DVec2::new(3.0, 4.0));
        assert_eq!(sim.follow_target(), None);

        sim.follow(Some(BodyId(0)));
        sim.reset_view();
        assert_eq!(sim.follow_target(), None);
        assert_eq!(sim.viewport().zoom(), viewport::DEFAULT_ZOOM);

        sim.follow(Some(BodyId(7)));
        assert_eq!(sim.follow_target(), None);
    }

    #[test]
    fn clicking_follows_the_hovered_body() {
        let mut sim = sun_and_earth(3600.0);
        let sun_screen = sim.body_on_screen(BodyId(0)).unwrap();

        assert_eq!(sim.hovered(sun_screen), vec![BodyId(0)]);
        sim.click(sun_screen + DVec2::new(2.0, 0.0));
        assert_eq!(sim.follow_target(), Some(BodyId(0)));

        sim.click(DVec2::new(5.0, 5.0));
        assert_eq!(sim.follow_target(), None);
    }

    #[test]
    fn offscreen_bodies_are_reported_absent() {
        let mut sim = sun_and_earth(3600.0);
        for _ in 0..20 {
            sim.zoom_at(DVec2::new(400.0, 300.0), ZoomDirection::In, true);
        }
        assert!(sim.body_on_screen(BodyId(0)).is_some());
        assert!(sim.body_on_screen(BodyId(1)).is_none());
        assert!(
            sim.viewport()
                .offscreen_indicator(sim.bodies()[1].position())
                .is_some()
        );
    }

    #[test]
    fn minimized_window_leaves_the_viewport_alone() {
        let mut sim = sun_and_earth(3600.0);
        let pan = sim.viewport().pan_offset();

        assert!(!sim.resize(DVec2::ZERO));
        assert!(!sim.resize(DVec2::ZERO));
        assert!(!sim.resize(DVec2::new(800.0, 600.0)));
        assert_eq!(sim.viewport().screen_size(), DVec2::new(800.0, 600.0));
        assert_eq!(sim.viewport().pan_offset(), pan);

        assert!(sim.resize(DVec2::new(1600.0, 600.0)));
        assert_eq!(sim.viewport().screen_size(), DVec2::new(1600.0, 600.0));
    }
}
