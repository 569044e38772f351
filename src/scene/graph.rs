//! Scene graph: the arena of body states and everything keyed by it.
//!
//! Bodies live in a `Vec` in catalog order. Cross-references (ECS entities,
//! hover state, controls) hold a [`BodyId`] rather than a reference, so tearing
//! the scene down is a single `clear`.

use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::TAU;

use crate::catalog::{BodyCatalog, BodyDescriptor, body_traits};
use crate::error::SceneError;

/// Upper bound for the per-body speed multiplier
pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;

/// Stable index of a body in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Position on a circular orbit in the y = 0 plane
pub fn orbit_position(phase: f32, orbit_radius: f32) -> Vec3 {
    Vec3::new(phase.cos() * orbit_radius, 0.0, phase.sin() * orbit_radius)
}

/// Mutable state of one orbiting body
#[derive(Debug, Clone)]
pub struct BodyState {
    pub id: BodyId,
    pub descriptor: BodyDescriptor,
    /// Orbital phase in radians, kept in `[0, 2π)`
    pub phase: f32,
    /// Current angular speed, `descriptor.speed * multiplier`
    pub speed: f32,
    pub multiplier: f32,
    /// Self-rotation angle about the local y axis
    pub rotation: f32,
    pub rotation_speed: f32,
    pub position: Vec3,
    /// Rendered sphere radius (descriptor radius times the visibility boost)
    pub mesh_radius: f32,
}

impl BodyState {
    fn new(id: BodyId, descriptor: BodyDescriptor, visibility_boost: f32) -> Self {
        let traits = body_traits(&descriptor.name);
        Self {
            id,
            phase: 0.0,
            speed: descriptor.speed,
            multiplier: 1.0,
            rotation: 0.0,
            rotation_speed: traits.rotation_speed,
            position: orbit_position(0.0, descriptor.orbit_radius),
            mesh_radius: descriptor.radius * visibility_boost,
            descriptor,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Set the speed multiplier, clamped to `[0, MAX_SPEED_MULTIPLIER]`.
    ///
    /// NaN is treated as zero. Returns the resulting angular speed.
    pub fn set_multiplier(&mut self, factor: f32) -> f32 {
        let factor = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, MAX_SPEED_MULTIPLIER)
        };
        self.multiplier = factor;
        self.speed = self.descriptor.speed * factor;
        self.speed
    }

    /// Advance one frame: phase, position, self-rotation
    pub fn advance(&mut self) {
        self.phase = (self.phase + self.speed).rem_euclid(TAU);
        self.position = orbit_position(self.phase, self.descriptor.orbit_radius);
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(TAU);
    }
}

/// State of the central, light-emitting body
#[derive(Debug, Clone, Default)]
pub struct CentralBody {
    pub rotation: f32,
}

/// A change of the hovered body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    Entered(BodyId),
    Cleared,
}

/// Which body, if any, is under the pointer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Option<BodyId>,
}

impl HoverState {
    pub fn current(&self) -> Option<BodyId> {
        self.current
    }

    /// Record the latest pick result; returns a transition only when it changed.
    pub fn update(&mut self, hit: Option<BodyId>) -> Option<HoverTransition> {
        if hit == self.current {
            return None;
        }
        self.current = hit;
        Some(match hit {
            Some(id) => HoverTransition::Entered(id),
            None => HoverTransition::Cleared,
        })
    }
}

/// Ownership root for the simulated scene
#[derive(Resource, Debug, Default)]
pub struct SolarSystem {
    bodies: Vec<BodyState>,
    index: HashMap<String, BodyId>,
    pub sun: CentralBody,
    pub hover: HoverState,
}

impl SolarSystem {
    /// Create one body state per descriptor, in catalog order.
    ///
    /// Fails without touching the arena if it is already populated or the
    /// catalog is invalid.
    pub fn populate(
        &mut self,
        catalog: &BodyCatalog,
        visibility_boost: f32,
    ) -> Result<(), SceneError> {
        if self.is_built() {
            return Err(SceneError::AlreadyBuilt);
        }
        catalog.validate()?;

        for (i, descriptor) in catalog.bodies().iter().enumerate() {
            let id = BodyId(i);
            self.index.insert(descriptor.name.clone(), id);
            self.bodies
                .push(BodyState::new(id, descriptor.clone(), visibility_boost));
        }
        self.sun = CentralBody::default();
        Ok(())
    }

    /// Drop every body state.
    ///
    /// Returns `Cleared` if a body was hovered, so the end of that hover is
    /// still reported.
    pub fn clear(&mut self) -> Option<HoverTransition> {
        let transition = self.hover.update(None);
        self.bodies.clear();
        self.index.clear();
        self.sun = CentralBody::default();
        transition
    }

    pub fn is_built(&self) -> bool {
        !self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [BodyState] {
        &mut self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.index.get(name).copied()
    }

    /// Scale a body's base speed by `factor` (clamped to `[0, 3]`).
    pub fn set_speed_multiplier(&mut self, name: &str, factor: f32) -> Result<f32, SceneError> {
        let id = self
            .id_of(name)
            .ok_or_else(|| SceneError::UnknownBody(name.to_string()))?;
        Ok(self.bodies[id.0].set_multiplier(factor))
    }
}
