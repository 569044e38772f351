use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod catalog;
mod controls;
mod error;
mod frame_loop;
mod orbital;
mod picking;
mod scene;
mod texture;
mod viewport;
mod visualization;

use catalog::{BodyCatalog, CatalogSource, load_catalog};
use controls::ControlsPlugin;
use frame_loop::FrameLoopPlugin;
use orbital::OrbitalPlugin;
use picking::HoverPickingPlugin;
use scene::{SceneConfig, ScenePlugin};
use viewport::{DEFAULT_EYE, DEFAULT_FOV_Y, DEFAULT_NEAR, MainCamera, ViewportPlugin};
use visualization::VisualizationPlugin;

// Setup camera and ambient light; the scene itself is built by ScenePlugin
fn setup_camera(mut commands: Commands, config: Res<SceneConfig>) {
    // Keeps the night side of each body faintly visible.
    commands.insert_resource(GlobalAmbientLight {
        brightness: 60.0,
        ..default()
    });

    let distance = DEFAULT_EYE.length();
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(distance),
        yaw: Some(0.0),
        pitch: Some((DEFAULT_EYE.y / distance).asin()),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: DEFAULT_FOV_Y,
            near: DEFAULT_NEAR,
            far: config.camera_far,
            ..default()
        }),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(DEFAULT_EYE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn report_catalog(catalog: Res<BodyCatalog>, source: Res<CatalogSource>) {
    match source.as_ref() {
        CatalogSource::BuiltIn => info!("Using built-in catalog ({} bodies)", catalog.len()),
        CatalogSource::File(path) => {
            info!("Loaded catalog from {} ({} bodies)", path.display(), catalog.len())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (catalog, source) = load_catalog()?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Bevy Solar System".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.insert_resource(catalog);
    app.insert_resource(source);
    app.add_plugins(PanOrbitCameraPlugin);

    // Add our custom plugins
    app.add_plugins(FrameLoopPlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(ScenePlugin);
    app.add_plugins(ViewportPlugin);
    app.add_plugins(HoverPickingPlugin);
    app.add_plugins(ControlsPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, (report_catalog, setup_camera));

    app.run();
    Ok(())
}
