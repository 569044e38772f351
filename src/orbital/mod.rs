//! Orbital simulation module
//!
//! Circular, coplanar orbits advanced once per frame while the simulation is
//! running.

use bevy::prelude::*;

pub mod step;

pub use step::{SimulationControl, advance};

/// Plugin for the orbital simulation state
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationControl>();
    }
}
