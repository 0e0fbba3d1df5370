use glam::DVec2;

pub const G: f64 = 6.67430e-11;

/// Meters per world unit. Positions are stored in world units, physics runs in meters.
pub const WORLD_SCALE: f64 = 10_000_000.0;

/// Pull on `a` towards `b`, in newtons. Coincident bodies contribute no force.
pub fn gravitational_force(position_a: DVec2, mass_a: f64, position_b: DVec2, mass_b: f64) -> DVec2 {
    let delta = (position_b - position_a) * WORLD_SCALE;
    let distance = delta.length();
    if distance == 0.0 {
        return DVec2::ZERO;
    }

    let magnitude = G * mass_a * mass_b / (distance * distance);
    let angle = delta.y.atan2(delta.x);
    DVec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_produce_no_force() {
        let position = DVec2::new(12.5, -3.0);
        let force = gravitational_force(position, 5.0e24, position, 7.0e22);
        assert_eq!(force, DVec2::ZERO);
    }

    #[test]
    fn force_follows_inverse_square_along_displacement() {
        let sun = 1.989e30;
        let earth = 5.972e24;
        let distance_m = 1.496e11;
        let force = gravitational_force(
            DVec2::ZERO,
            earth,
            DVec2::new(distance_m / WORLD_SCALE, 0.0),
            sun,
        );

        let expected = G * sun * earth / (distance_m * distance_m);
        assert!((force.x - expected).abs() / expected < 1e-12);
        assert!(force.y.abs() < expected * 1e-12);
    }

    #[test]
    fn forces_are_equal_and_opposite() {
        let a = DVec2::new(-4.0, 7.5);
        let b = DVec2::new(30.0, -12.0);
        let on_a = gravitational_force(a, 3.0e23, b, 8.0e25);
        let on_b = gravitational_force(b, 8.0e25, a, 3.0e23);
        let sum = on_a + on_b;
        assert!(sum.length() <= on_a.length() * 1e-12);
        assert!(on_a.dot(b - a) > 0.0);
    }
}
