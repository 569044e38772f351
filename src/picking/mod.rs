//! Pointer picking module
//!
//! Casts the main camera's ray under the cursor against the orbiting bodies'
//! spheres and reports hover changes.

use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow};

pub mod resolver;

pub use resolver::PointerSample;

use crate::frame_loop::FrameSet;
use crate::scene::{HoverTransition, SolarSystem};
use crate::viewport::MainCamera;
use resolver::resolve_sample;

/// Hover transition, emitted only when the hovered body changes
#[derive(Message, Debug, Clone, PartialEq)]
pub struct HoverChanged {
    /// Identifier of the newly hovered body, `None` when cleared
    pub body: Option<String>,
    /// Pointer position that caused the transition, if it is over the window
    pub pointer: Option<Vec2>,
}

impl HoverChanged {
    /// Hover ended without a pointer position (pointer left, scene torn down)
    pub fn cleared() -> Self {
        Self {
            body: None,
            pointer: None,
        }
    }
}

/// Plugin for hover picking
pub struct HoverPickingPlugin;

impl Plugin for HoverPickingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerSample>()
            .add_message::<HoverChanged>()
            .add_systems(
                Update,
                (sample_pointer, resolve_hover)
                    .chain()
                    .in_set(FrameSet::Pick),
            );
    }
}

/// Turn primary-window cursor messages into world rays from the main camera
fn sample_pointer(
    mut moves: MessageReader<CursorMoved>,
    mut left: MessageReader<CursorLeft>,
    primary: Query<Entity, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut samples: MessageWriter<PointerSample>,
) {
    let Ok(primary) = primary.single() else {
        return;
    };
    let camera = camera.single().ok();

    for cursor in moves.read().filter(|m| m.window == primary) {
        let Some((camera, transform)) = camera else {
            break;
        };
        match camera.viewport_to_world(transform, cursor.position) {
            Ok(ray) => {
                samples.write(PointerSample::Over {
                    ray,
                    pointer: cursor.position,
                });
            }
            Err(e) => debug!("No pick ray at {:?}: {:?}", cursor.position, e),
        }
    }

    if left.read().any(|l| l.window == primary) {
        samples.write(PointerSample::Left);
    }
}

/// Resolve pointer samples against this frame's body positions
fn resolve_hover(
    mut samples: MessageReader<PointerSample>,
    mut system: ResMut<SolarSystem>,
    mut hover_changed: MessageWriter<HoverChanged>,
) {
    for sample in samples.read() {
        let Some(transition) = resolve_sample(&mut system, sample) else {
            continue;
        };
        let pointer = match sample {
            PointerSample::Over { pointer, .. } => Some(*pointer),
            PointerSample::Left => None,
        };
        let body = match transition {
            HoverTransition::Entered(id) => system.get(id).map(|b| b.name().to_string()),
            HoverTransition::Cleared => None,
        };
        hover_changed.write(HoverChanged { body, pointer });
    }
}
