//! Visualization module
//!
//! Hover-dependent feedback drawn on top of the scene.

use bevy::prelude::*;

pub mod hover;

pub use hover::apply_hover_highlight;

use crate::frame_loop::FrameSet;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_hover_highlight.in_set(FrameSet::Feedback));
    }
}
