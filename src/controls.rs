//! Keyboard controls for the running flag, speed multipliers, and scene lifetime

use bevy::prelude::*;

use crate::error::SceneError;
use crate::frame_loop::FrameSet;
use crate::orbital::SimulationControl;
use crate::scene::{BodyId, SceneCommand, SolarSystem};

/// Multiplier change per Up/Down press
pub const MULTIPLIER_STEP: f32 = 0.25;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Body whose speed multiplier the arrow keys adjust
#[derive(Resource, Debug, Default)]
pub struct SelectedBody(pub Option<BodyId>);

/// Plugin for keyboard controls
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedBody>().add_systems(
            Update,
            (toggle_running, select_body, adjust_speed, scene_keys).in_set(FrameSet::Input),
        );
    }
}

fn digit_index(key: KeyCode) -> Option<usize> {
    DIGIT_KEYS.iter().position(|k| *k == key)
}

/// Change a body's multiplier by `delta`; the result is clamped by the arena.
pub fn step_multiplier(
    system: &mut SolarSystem,
    id: BodyId,
    delta: f32,
) -> Result<f32, SceneError> {
    let (name, current) = system
        .get(id)
        .map(|body| (body.name().to_string(), body.multiplier))
        .ok_or_else(|| SceneError::UnknownBody(format!("#{}", id.0 + 1)))?;
    system.set_speed_multiplier(&name, current + delta)
}

fn toggle_running(keys: Res<ButtonInput<KeyCode>>, mut control: ResMut<SimulationControl>) {
    if keys.just_pressed(KeyCode::Space) {
        let running = control.toggle();
        info!("Simulation {}", if running { "running" } else { "paused" });
    }
}

fn select_body(
    keys: Res<ButtonInput<KeyCode>>,
    system: Res<SolarSystem>,
    mut selected: ResMut<SelectedBody>,
) {
    let Some(index) = keys.get_just_pressed().find_map(|key| digit_index(*key)) else {
        return;
    };
    match system.get(BodyId(index)) {
        Some(body) => {
            selected.0 = Some(body.id);
            info!("Selected {} ({:.2}x)", body.name(), body.multiplier);
        }
        None => warn!("No body at slot {}", index + 1),
    }
}

fn adjust_speed(
    keys: Res<ButtonInput<KeyCode>>,
    selected: Res<SelectedBody>,
    mut system: ResMut<SolarSystem>,
) {
    let Some(id) = selected.0 else {
        return;
    };
    let result = if keys.just_pressed(KeyCode::ArrowUp) {
        step_multiplier(&mut system, id, MULTIPLIER_STEP)
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        step_multiplier(&mut system, id, -MULTIPLIER_STEP)
    } else if keys.just_pressed(KeyCode::Digit0) {
        let current = system.get(id).map_or(1.0, |body| body.multiplier);
        step_multiplier(&mut system, id, 1.0 - current)
    } else {
        return;
    };
    match result {
        Ok(speed) => {
            if let Some(body) = system.get(id) {
                info!(
                    "{} speed {:.2}x ({:.4} rad/frame)",
                    body.name(),
                    body.multiplier,
                    speed
                );
            }
        }
        Err(e) => warn!("Speed change ignored: {}", e),
    }
}

fn scene_keys(keys: Res<ButtonInput<KeyCode>>, mut scene_commands: MessageWriter<SceneCommand>) {
    if keys.just_pressed(KeyCode::KeyR) {
        info!("Rebuilding scene");
        scene_commands.write(SceneCommand::Rebuild);
    }
    if keys.just_pressed(KeyCode::Escape) {
        scene_commands.write(SceneCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_support::single_body_catalog;

    #[test]
    fn test_digit_keys_map_to_catalog_slots() {
        assert_eq!(digit_index(KeyCode::Digit1), Some(0));
        assert_eq!(digit_index(KeyCode::Digit9), Some(8));
        assert_eq!(digit_index(KeyCode::Digit0), None);
        assert_eq!(digit_index(KeyCode::KeyA), None);
    }

    #[test]
    fn test_step_multiplier_clamps_at_bounds() {
        let mut system = SolarSystem::default();
        system.populate(&single_body_catalog(30.0, 0.04), 1.0).unwrap();
        let id = BodyId(0);

        for _ in 0..20 {
            step_multiplier(&mut system, id, MULTIPLIER_STEP).unwrap();
        }
        assert_eq!(system.bodies()[0].multiplier, 3.0);

        for _ in 0..20 {
            step_multiplier(&mut system, id, -MULTIPLIER_STEP).unwrap();
        }
        assert_eq!(system.bodies()[0].multiplier, 0.0);
        assert_eq!(system.bodies()[0].speed, 0.0);
    }

    #[test]
    fn test_step_multiplier_unknown_slot() {
        let mut system = SolarSystem::default();
        system.populate(&single_body_catalog(30.0, 0.04), 1.0).unwrap();
        assert!(matches!(
            step_multiplier(&mut system, BodyId(4), 1.0),
            Err(SceneError::UnknownBody(_))
        ));
    }
}
