//! Scene configuration

use bevy::prelude::*;

/// Construction parameters for the solar-system scene
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub body_texture_size: u32,
    pub sun_texture_size: u32,
    /// Scale applied to the unit sphere of the central body
    pub sun_scale: f32,
    /// Descriptor radius multiplier for rendered and picked spheres
    pub visibility_boost: f32,
    pub glow_scale: f32,
    pub glow_opacity: f32,
    pub orbit_segments: usize,
    pub orbit_guide_color: Color,
    pub star_count: usize,
    /// Half-extent of the cube the starfield is scattered over
    pub star_extent: f32,
    pub sun_light_intensity: f32,
    pub sun_light_range: f32,
    pub sun_emissive: LinearRgba,
    pub highlight_emissive: LinearRgba,
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
    pub camera_far: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            body_texture_size: 256,
            sun_texture_size: 512,
            sun_scale: 6.0,
            visibility_boost: 1.5,
            glow_scale: 1.2,
            glow_opacity: 0.15,
            orbit_segments: 64,
            orbit_guide_color: Color::srgba(0.55, 0.6, 0.75, 0.35),
            star_count: 4000,
            star_extent: 600.0,
            sun_light_intensity: 40_000_000.0,
            sun_light_range: 500.0,
            sun_emissive: LinearRgba::rgb(1.6, 1.2, 0.6),
            highlight_emissive: LinearRgba::rgb(0.35, 0.35, 0.45),
            sphere_sectors: 48,
            sphere_stacks: 24,
            camera_far: 2000.0,
        }
    }
}
