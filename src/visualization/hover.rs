//! Hover feedback: emissive highlight and a stronger halo on the hovered body

use bevy::prelude::*;

use crate::picking::HoverChanged;
use crate::scene::{BodyId, GlowShell, OrbitingBody, SceneConfig, SolarSystem};

/// Halo opacity multiplier while hovered
const HOVER_GLOW_GAIN: f32 = 2.5;

/// Emissive color for a body given the current hover
pub fn highlight_for(body: BodyId, hovered: Option<BodyId>, highlight: LinearRgba) -> LinearRgba {
    if hovered == Some(body) {
        highlight
    } else {
        LinearRgba::BLACK
    }
}

fn glow_alpha(body: BodyId, hovered: Option<BodyId>, opacity: f32) -> f32 {
    if hovered == Some(body) {
        (opacity * HOVER_GLOW_GAIN).min(1.0)
    } else {
        opacity
    }
}

/// Apply the highlight whenever the hovered body changes
pub fn apply_hover_highlight(
    mut hover_changed: MessageReader<HoverChanged>,
    system: Res<SolarSystem>,
    config: Res<SceneConfig>,
    bodies: Query<(&OrbitingBody, &MeshMaterial3d<StandardMaterial>)>,
    shells: Query<(&GlowShell, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(last) = hover_changed.read().last() else {
        return;
    };
    match (&last.body, last.pointer) {
        (Some(name), Some(pointer)) => info!("Hovering {} at {:?}", name, pointer),
        (Some(name), None) => info!("Hovering {}", name),
        (None, _) => debug!("Hover cleared"),
    }

    let hovered = system.hover.current();
    for (body, material) in bodies.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.emissive = highlight_for(body.0, hovered, config.highlight_emissive);
        }
    }
    for (shell, material) in shells.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            let alpha = glow_alpha(shell.0, hovered, config.glow_opacity);
            material.base_color.set_alpha(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_hovered_body_glows() {
        let glow = LinearRgba::rgb(0.3, 0.3, 0.4);
        assert_eq!(highlight_for(BodyId(1), Some(BodyId(1)), glow), glow);
        assert_eq!(highlight_for(BodyId(0), Some(BodyId(1)), glow), LinearRgba::BLACK);
        assert_eq!(highlight_for(BodyId(0), None, glow), LinearRgba::BLACK);
    }

    #[test]
    fn test_halo_brightens_and_saturates() {
        assert!((glow_alpha(BodyId(2), Some(BodyId(2)), 0.15) - 0.375).abs() < 1e-6);
        assert_eq!(glow_alpha(BodyId(2), None, 0.15), 0.15);
        assert_eq!(glow_alpha(BodyId(2), Some(BodyId(2)), 0.6), 1.0);
    }
}
