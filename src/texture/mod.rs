//! Procedural surface textures
//!
//! Each body gets a square image painted from its base color and the
//! decoration recipe found in the traits table. Decorative detail is random;
//! only the base fill is deterministic.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::Rng;

pub mod canvas;
pub mod recipes;

use crate::catalog::{BodyDescriptor, body_traits};
use canvas::{Canvas, Rgb};

/// Opacity of the surface grain overlay
pub const GRAIN_ALPHA: f32 = 0.06;

const SUN_GRADIENT: [(f32, Rgb); 4] = [
    (0.0, [1.0, 0.97, 0.82]),
    (0.45, [1.0, 0.78, 0.28]),
    (0.8, [0.93, 0.5, 0.1]),
    (1.0, [0.7, 0.24, 0.04]),
];
const SUN_SPECKLES: u32 = 450;

/// Square RGBA8 pixel buffer ready to become an [`Image`]
#[derive(Debug, Clone)]
pub struct SurfaceTexture {
    pub size: u32,
    pub data: Vec<u8>,
}

impl SurfaceTexture {
    fn from_canvas(canvas: Canvas) -> Self {
        Self {
            size: canvas.size(),
            data: canvas.into_rgba8(),
        }
    }

    /// Convert into a GPU image; the CPU-side copy is dropped after upload.
    pub fn into_image(self) -> Image {
        Image::new(
            Extent3d {
                width: self.size,
                height: self.size,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD,
        )
    }
}

/// Paint the surface of an orbiting body
pub fn generate_body_texture<R: Rng>(
    descriptor: &BodyDescriptor,
    size: u32,
    rng: &mut R,
) -> SurfaceTexture {
    let base = descriptor.color.to_unit();
    let mut canvas = Canvas::filled(size, base);
    for decoration in body_traits(&descriptor.name).decorations {
        recipes::apply(&mut canvas, base, decoration, rng);
    }
    canvas.grain(rng, GRAIN_ALPHA);
    SurfaceTexture::from_canvas(canvas)
}

/// Paint the central body: radial gradient plus bright speckles
pub fn generate_sun_texture<R: Rng>(size: u32, rng: &mut R) -> SurfaceTexture {
    let mut canvas = Canvas::filled(size, SUN_GRADIENT[0].1);
    canvas.radial_gradient(&SUN_GRADIENT);
    let extent = canvas.size() as f32;
    for _ in 0..SUN_SPECKLES {
        let x = rng.gen_range(0.0..extent);
        let y = rng.gen_range(0.0..extent);
        let r = rng.gen_range(0.5..1.6);
        canvas.circle(x, y, r, [1.0, 1.0, 0.9], rng.gen_range(0.3..0.8));
    }
    canvas.grain(rng, GRAIN_ALPHA * 0.5);
    SurfaceTexture::from_canvas(canvas)
}
