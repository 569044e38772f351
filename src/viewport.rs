//! Window-size adaptation.
//!
//! [`OutputSurface`] tracks the logical size of the primary window and every
//! resize refreshes the main camera's perspective aspect ratio.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::frame_loop::FrameSet;

/// Marker for the camera that renders the scene and drives picking
#[derive(Component)]
pub struct MainCamera;

pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 80.0, 120.0);
pub const DEFAULT_FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const DEFAULT_NEAR: f32 = 0.1;

/// Logical size of the surface the scene renders to
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OutputSurface {
    pub width: f32,
    pub height: f32,
}

impl Default for OutputSurface {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Record a host resize; degenerate sizes clamp to one pixel.
///
/// Returns the new aspect ratio.
pub fn apply_resize(surface: &mut OutputSurface, width: f32, height: f32) -> f32 {
    surface.width = width.max(1.0);
    surface.height = height.max(1.0);
    surface.width / surface.height
}

fn set_aspect(projection: &mut Projection, aspect: f32) {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = aspect;
    }
}

/// Plugin keeping the projection consistent with the primary window
pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OutputSurface>()
            .add_systems(Startup, init_output_surface)
            .add_systems(Update, handle_window_resized.in_set(FrameSet::Input));
    }
}

fn init_output_surface(
    window: Query<&Window, With<PrimaryWindow>>,
    mut surface: ResMut<OutputSurface>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    apply_resize(&mut surface, window.width(), window.height());
}

/// Recompute aspect ratio and projection whenever the primary window resizes
pub fn handle_window_resized(
    mut resized: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut surface: ResMut<OutputSurface>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(primary) = primary.single() else {
        return;
    };
    for event in resized.read().filter(|e| e.window == primary) {
        let aspect = apply_resize(&mut surface, event.width, event.height);
        for mut projection in projections.iter_mut() {
            set_aspect(&mut projection, aspect);
        }
        debug!(
            "Viewport resized to {}x{} (aspect {:.3})",
            surface.width, surface.height, aspect
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect_of(app: &App, camera: Entity) -> f32 {
        match app.world().get::<Projection>(camera) {
            Some(Projection::Perspective(perspective)) => perspective.aspect_ratio,
            other => panic!("unexpected projection {:?}", other),
        }
    }

    #[test]
    fn test_resize_is_idempotent_and_clamps() {
        let mut surface = OutputSurface::default();
        assert_eq!(apply_resize(&mut surface, 800.0, 400.0), 2.0);
        let once = surface;
        assert_eq!(apply_resize(&mut surface, 800.0, 400.0), 2.0);
        assert_eq!(once, surface);

        assert_eq!(apply_resize(&mut surface, 0.0, 0.0), 1.0);
        assert_eq!((surface.width, surface.height), (1.0, 1.0));
    }

    #[test]
    fn test_window_resize_refreshes_main_camera_projection() {
        let mut app = App::new();
        app.add_message::<WindowResized>().add_plugins(ViewportPlugin);
        let window = app.world_mut().spawn((Window::default(), PrimaryWindow)).id();
        let camera = app
            .world_mut()
            .spawn((
                Projection::Perspective(PerspectiveProjection::default()),
                MainCamera,
            ))
            .id();
        let unrelated = app
            .world_mut()
            .spawn(Projection::Perspective(PerspectiveProjection::default()))
            .id();
        app.update();

        app.world_mut().write_message(WindowResized {
            window,
            width: 800.0,
            height: 400.0,
        });
        app.update();

        assert_eq!(aspect_of(&app, camera), 2.0);
        assert_eq!(aspect_of(&app, unrelated), 1.0);
        let surface = app.world().resource::<OutputSurface>();
        assert_eq!((surface.width, surface.height), (800.0, 400.0));
    }
}
