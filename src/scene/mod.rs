//! Scene module
//!
//! This module owns the solar-system arena and builds the renderable scene
//! (central body, orbiting bodies with glow shells, orbit guides, starfield).

use bevy::prelude::*;

pub mod builder;
pub mod config;
pub mod graph;

pub use builder::{
    CentralBodyMesh, GlowShell, OrbitingBody, SceneAssets, SceneCommand, handle_scene_commands,
    setup_scene,
};
pub use config::SceneConfig;
pub use graph::{BodyId, HoverTransition, SolarSystem};

use crate::frame_loop::FrameSet;

/// Plugin for scene construction and lifetime commands
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .init_resource::<SolarSystem>()
            .init_resource::<SceneAssets>()
            .add_message::<SceneCommand>()
            .add_systems(Startup, setup_scene)
            .add_systems(Update, handle_scene_commands.in_set(FrameSet::Input));
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{HoverLog, scene_app};
    use super::*;
    use crate::frame_loop::{FrameLoop, LoopState};
    use crate::picking::HoverChanged;

    fn hover_earth(app: &mut App) {
        let mut system = app.world_mut().resource_mut::<SolarSystem>();
        let earth = system.id_of("Earth");
        assert!(earth.is_some());
        system.hover.update(earth);
    }

    #[test]
    fn test_rebuild_reports_end_of_hover() {
        let mut app = scene_app();
        app.update();
        hover_earth(&mut app);

        app.world_mut().write_message(SceneCommand::Rebuild);
        app.update();

        let log = &app.world().resource::<HoverLog>().0;
        assert_eq!(log, &vec![HoverChanged::cleared()]);
        let system = app.world().resource::<SolarSystem>();
        assert!(system.is_built());
        assert_eq!(system.hover.current(), None);
        assert_eq!(app.world().resource::<FrameLoop>().state(), LoopState::Running);
    }

    #[test]
    fn test_teardown_without_hover_reports_nothing() {
        let mut app = scene_app();
        app.update();

        app.world_mut().write_message(SceneCommand::Teardown);
        app.update();

        assert!(app.world().resource::<HoverLog>().0.is_empty());
        assert!(!app.world().resource::<SolarSystem>().is_built());
    }
}
