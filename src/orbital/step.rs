//! Per-frame orbital update

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::catalog::SUN_ROTATION_SPEED;
use crate::scene::SolarSystem;

/// Running flag for the orbital simulation
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimulationControl {
    pub running: bool,
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self { running: true }
    }
}

impl SimulationControl {
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }
}

/// Advance every body by one frame, then the central body's rotation.
///
/// Speeds are radians per frame; bodies do not interact.
pub fn advance(system: &mut SolarSystem) {
    for body in system.bodies_mut() {
        body.advance();
    }
    system.sun.rotation = (system.sun.rotation + SUN_ROTATION_SPEED).rem_euclid(TAU);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::scene::graph::orbit_position;
    use crate::scene::test_support::single_body_catalog;

    fn built(orbit_radius: f32, speed: f32) -> SolarSystem {
        let mut system = SolarSystem::default();
        system
            .populate(&single_body_catalog(orbit_radius, speed), 1.0)
            .unwrap();
        system
    }

    #[test]
    fn test_phase_accumulates_per_tick() {
        for ticks in [0_u32, 1, 7, 250, 1000] {
            let mut system = built(12.0, 0.05);
            for _ in 0..ticks {
                advance(&mut system);
            }
            let body = &system.bodies()[0];
            let expected = (ticks as f32 * 0.05).rem_euclid(TAU);
            assert!((body.phase - expected).abs() < 1e-3, "{} ticks", ticks);
            assert!(body.phase >= 0.0 && body.phase < TAU);
            assert!(body.position.distance(orbit_position(body.phase, 12.0)) < 1e-5);
        }
    }

    #[test]
    fn test_hundred_ticks_end_to_end() {
        let mut system = built(30.0, 0.03);
        for _ in 0..100 {
            advance(&mut system);
        }
        let body = &system.bodies()[0];
        assert!((body.phase - 3.0).abs() < 1e-4, "phase {}", body.phase);
        let expected = Vec3::new(30.0 * 3.0_f32.cos(), 0.0, 30.0 * 3.0_f32.sin());
        assert!(body.position.distance(expected) < 1e-2, "{:?}", body.position);
        assert!((body.position.x + 29.70).abs() < 0.02);
        assert!((body.position.z - 4.23).abs() < 0.01);
        assert_eq!(body.position.y, 0.0);
    }

    #[test]
    fn test_rotation_follows_traits_not_orbit_speed() {
        let mut system = SolarSystem::default();
        system.populate(&default_catalog(), 1.0).unwrap();
        advance(&mut system);
        for body in system.bodies() {
            assert!((body.rotation - body.rotation_speed).abs() < 1e-6, "{}", body.name());
        }
        assert!((system.sun.rotation - SUN_ROTATION_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_paused_body_with_zero_multiplier_keeps_phase() {
        let mut system = built(30.0, 0.03);
        system.set_speed_multiplier("Earth", 0.0).unwrap();
        for _ in 0..10 {
            advance(&mut system);
        }
        assert_eq!(system.bodies()[0].phase, 0.0);
    }

    #[test]
    fn test_control_toggle() {
        let mut control = SimulationControl::default();
        assert!(control.running);
        assert!(!control.toggle());
        assert!(control.toggle());
    }
}
