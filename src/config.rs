use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Body, Simulation, SimulationClock, Viewport, WORLD_SCALE};

pub const DEFAULT_FIXED_STEP_SECS: f64 = 60.0 * 60.0;
pub const DEFAULT_SPEED: f64 = 6.0 * 60.0 * 60.0 * 60.0;
pub const DEFAULT_MAX_STEPS_PER_FRAME: usize = 2000;
pub const DEFAULT_GRID_SPACING: f64 = 100_000.0;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fixed_step_secs: f64,
    pub speed: f64,
    /// Zero disables the cap.
    pub max_steps_per_frame: usize,
    pub grid_spacing: f64,
    pub bodies: Vec<BodyConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    /// Meters from the origin; converted to world units on load.
    pub position_m: [f64; 2],
    pub velocity: [f64; 2],
    pub color: [u8; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_step_secs: DEFAULT_FIXED_STEP_SECS,
            speed: DEFAULT_SPEED,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            grid_spacing: DEFAULT_GRID_SPACING,
            bodies: solar_system(),
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid scene file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("scene is not valid JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scene")
    }

    pub fn build_bodies(&self) -> Result<Vec<Body>> {
        self.bodies
            .iter()
            .map(|body| {
                Body::new(
                    body.name.clone(),
                    body.mass,
                    body.radius,
                    DVec2::from_array(body.position_m) / WORLD_SCALE,
                    DVec2::from_array(body.velocity),
                    body.color,
                )
            })
            .collect()
    }

    pub fn build_simulation(&self, screen_size: DVec2) -> Result<Simulation> {
        let bodies = self.build_bodies()?;
        let max_steps = (self.max_steps_per_frame > 0).then_some(self.max_steps_per_frame);
        let clock = SimulationClock::new(self.fixed_step_secs, self.speed, max_steps)?;
        Simulation::new(bodies, clock, Viewport::new(screen_size), self.grid_spacing)
    }
}

fn planet(
    name: &str,
    mass: f64,
    radius: f64,
    distance: f64,
    orbital_speed: f64,
    color: [u8; 3],
) -> BodyConfig {
    BodyConfig {
        name: name.to_owned(),
        mass,
        radius,
        position_m: [distance, 0.0],
        velocity: [0.0, orbital_speed],
        color,
    }
}

/// The Sun and the eight planets lined up along +x, each moving along +y.
pub fn solar_system() -> Vec<BodyConfig> {
    vec![
        planet("Sun", 1.989e30, 696_340_000.0, 0.0, 0.0, [255, 204, 0]),
        planet("Mercury", 3.302e23, 2_439_700.0, 5.791e10, 47_362.0, [123, 123, 123]),
        planet("Venus", 4.869e24, 6_051_800.0, 1.082e11, 35_020.0, [229, 194, 154]),
        planet("Earth", 5.972e24, 6_371_000.0, 1.496e11, 29_780.0, [59, 92, 154]),
        planet("Mars", 6.42e23, 3_389_500.0, 2.279e11, 24_077.0, [193, 68, 14]),
        planet("Jupiter", 1.898e27, 71_492_000.0, 7.783e11, 13_060.0, [209, 154, 106]),
        planet("Saturn", 5.684e26, 58_232_000.0, 1.427e12, 10_118.0, [209, 180, 140]),
        planet("Uranus", 8.681e25, 25_362_000.0, 2.871e12, 6_810.0, [167, 198, 217]),
        planet("Neptune", 1.024e26, 24_622_000.0, 4.497e12, 5_477.0, [75, 111, 154]),
    ]
}
