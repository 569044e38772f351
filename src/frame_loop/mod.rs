//! Frame loop controller
//!
//! An explicit Idle/Running/Stopped state machine. Mounting hands out a
//! [`LoopToken`], kept in [`MountedToken`]; a tick only does work when its
//! token belongs to the current mount and the loop is running. Teardown bumps
//! the generation, so a token held from before it is cancelled.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::error::FrameError;
use crate::orbital::{self, SimulationControl};
use crate::scene::{BodyId, CentralBodyMesh, OrbitingBody, SceneCommand, SolarSystem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Identifies one mount of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token or loop not running; nothing was touched.
    Cancelled,
    Rendered { simulated: bool },
}

/// Ordering of the per-frame work in `Update`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Host input: controls, scene commands, resizes
    Input,
    /// Simulation step followed by render publication
    Tick,
    /// Pointer picking against this frame's positions
    Pick,
    /// Hover-dependent feedback
    Feedback,
}

/// Token from the last mount; every tick is issued against it
#[derive(Resource, Debug, Default)]
pub struct MountedToken(pub Option<LoopToken>);

#[derive(Resource, Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    generation: u64,
}

impl FrameLoop {
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Start a new mount lifetime; any earlier token becomes stale.
    pub fn mount(&mut self) -> LoopToken {
        self.generation += 1;
        self.state = LoopState::Running;
        LoopToken(self.generation)
    }

    /// Stop the loop and invalidate every outstanding token
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.state = LoopState::Stopped;
    }

    pub fn is_current(&self, token: LoopToken) -> bool {
        self.state == LoopState::Running && token.0 == self.generation
    }

    /// Run one frame: the simulation step if `running`, then `render`.
    ///
    /// A lost surface stops the loop; other render errors leave it running.
    pub fn tick<F>(
        &mut self,
        token: LoopToken,
        system: &mut SolarSystem,
        running: bool,
        render: F,
    ) -> Result<TickOutcome, FrameError>
    where
        F: FnOnce(&SolarSystem) -> Result<(), FrameError>,
    {
        if !self.is_current(token) {
            return Ok(TickOutcome::Cancelled);
        }
        if running {
            orbital::advance(system);
        }
        match render(system) {
            Ok(()) => Ok(TickOutcome::Rendered { simulated: running }),
            Err(FrameError::SurfaceLost) => {
                self.state = LoopState::Stopped;
                Err(FrameError::SurfaceLost)
            }
            Err(e) => Err(e),
        }
    }
}

/// Plugin for the frame loop and the per-frame schedule
pub struct FrameLoopPlugin;

impl Plugin for FrameLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameLoop>()
            .init_resource::<MountedToken>()
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Tick,
                    FrameSet::Pick,
                    FrameSet::Feedback,
                )
                    .chain(),
            )
            .add_systems(Update, run_frame.in_set(FrameSet::Tick));
    }
}

/// Copy arena state onto entity transforms.
///
/// A body entity without a state in the arena is reported after every other
/// transform has been written.
fn publish_transforms(
    system: &SolarSystem,
    bodies: &mut Query<(&OrbitingBody, &mut Transform), Without<CentralBodyMesh>>,
    sun: &mut Query<&mut Transform, With<CentralBodyMesh>>,
) -> Result<(), FrameError> {
    let mut orphan: Option<BodyId> = None;
    for (body, mut transform) in bodies.iter_mut() {
        match system.get(body.0) {
            Some(state) => {
                transform.translation = state.position;
                transform.rotation = Quat::from_rotation_y(state.rotation);
            }
            None => orphan = orphan.or(Some(body.0)),
        }
    }
    for mut transform in sun.iter_mut() {
        transform.rotation = Quat::from_rotation_y(system.sun.rotation);
    }
    match orphan {
        Some(id) => Err(FrameError::Render(format!("no body state for {:?}", id))),
        None => Ok(()),
    }
}

fn run_frame(
    mut frame_loop: ResMut<FrameLoop>,
    mut mounted: ResMut<MountedToken>,
    mut system: ResMut<SolarSystem>,
    control: Res<SimulationControl>,
    window: Query<(), With<PrimaryWindow>>,
    mut bodies: Query<(&OrbitingBody, &mut Transform), Without<CentralBodyMesh>>,
    mut sun: Query<&mut Transform, With<CentralBodyMesh>>,
    mut scene_commands: MessageWriter<SceneCommand>,
) {
    let Some(token) = mounted.0 else {
        return;
    };
    let result = frame_loop.tick(token, &mut system, control.running, |system| {
        if window.is_empty() {
            return Err(FrameError::SurfaceLost);
        }
        publish_transforms(system, &mut bodies, &mut sun)
    });
    match result {
        Ok(TickOutcome::Rendered { .. }) => {}
        Ok(TickOutcome::Cancelled) => {
            debug!("Dropping stale frame token {:?}", token);
            mounted.0 = None;
        }
        Err(FrameError::SurfaceLost) => {
            error!("Output surface lost; stopping frame loop");
            scene_commands.write(SceneCommand::Teardown);
        }
        Err(e) => error!("Frame failed: {}", e),
    }
}
