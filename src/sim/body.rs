use anyhow::{Result, ensure};
use glam::DVec2;

use super::force::{WORLD_SCALE, gravitational_force};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

#[derive(Clone, Debug)]
pub struct Body {
    name: String,
    mass: f64,
    radius: f64,
    position: DVec2,
    velocity: DVec2,
    color: [u8; 3],
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: DVec2,
        velocity: DVec2,
        color: [u8; 3],
    ) -> Result<Self> {
        let name = name.into();
        ensure!(
            mass.is_finite() && mass > 0.0,
            "body {name:?} needs a positive mass, got {mass}"
        );
        ensure!(
            radius.is_finite() && radius > 0.0,
            "body {name:?} needs a positive radius, got {radius}"
        );
        ensure!(
            position.is_finite() && velocity.is_finite(),
            "body {name:?} has a non-finite position or velocity"
        );

        Ok(Self {
            name,
            mass,
            radius,
            position,
            velocity,
            color,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    /// Sum of the pull of every other body. `id` is this body's slot in `bodies`; the
    /// slot is skipped by position, so two bodies with identical state still see each other.
    pub fn net_force(&self, id: BodyId, bodies: &[Body]) -> DVec2 {
        bodies
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != id.0)
            .fold(DVec2::ZERO, |total, (_, other)| {
                total + gravitational_force(self.position, self.mass, other.position, other.mass)
            })
    }

    /// Semi-implicit Euler: velocity from the start-of-step force, then position from the
    /// new velocity.
    pub fn integrate(&mut self, force: DVec2, dt: f64) {
        self.velocity += force / self.mass * dt;
        self.position += self.velocity * dt / WORLD_SCALE;
    }
}

/// Advances every body by `dt` seconds. All forces are evaluated against the positions
/// from before the pass; `forces` is scratch space reused between calls.
pub fn step_bodies(bodies: &mut [Body], forces: &mut Vec<DVec2>, dt: f64) {
    forces.clear();
    forces.reserve(bodies.len().saturating_sub(forces.capacity()));
    for (index, body) in bodies.iter().enumerate() {
        forces.push(body.net_force(BodyId(index), bodies));
    }

    for (body, force) in bodies.iter_mut().zip(forces.iter()) {
        body.integrate(*force, dt);
    }
}
