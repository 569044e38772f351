//! Decoration recipes painted on top of a body's base color.
//!
//! Sizes and positions are fractions of the texture size so the same recipe
//! works at any resolution.

use rand::Rng;

use crate::texture::canvas::{Canvas, Rgb};

/// Color of a decoration, either derived from the base color or absolute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tint {
    /// Base color multiplied by a factor (<1 darker, >1 lighter)
    Shade(f32),
    Fixed(Rgb),
}

impl Tint {
    pub fn resolve(self, base: Rgb) -> Rgb {
        match self {
            Tint::Shade(k) => [
                (base[0] * k).min(1.0),
                (base[1] * k).min(1.0),
                (base[2] * k).min(1.0),
            ],
            Tint::Fixed(color) => color,
        }
    }
}

/// One rule of a surface recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoration {
    /// Dark pits with a lighter rim, stippled anywhere on the surface
    Craters {
        count: u32,
        radius: (f32, f32),
        depth: f32,
    },
    /// Full-width horizontal bands with randomized height and brightness
    Bands {
        count: u32,
        height: (f32, f32),
        spread: f32,
        alpha: f32,
    },
    /// Caps covering the top and bottom `extent` of the image
    PolarCaps { extent: f32, tint: Tint, alpha: f32 },
    /// Soft elliptical storm, jittered around `center`
    Storm {
        center: (f32, f32),
        radii: (f32, f32),
        tint: Tint,
        alpha: f32,
    },
    /// Soft round blobs (clouds, continents, dust)
    Blobs {
        count: u32,
        radius: (f32, f32),
        tint: Tint,
        alpha: f32,
    },
    /// Wavy strokes following the latitude lines
    Swirls {
        count: u32,
        amplitude: (f32, f32),
        thickness: f32,
        tint: Tint,
        alpha: f32,
    },
}

fn sample<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Paint one decoration onto the canvas
pub fn apply<R: Rng>(canvas: &mut Canvas, base: Rgb, decoration: &Decoration, rng: &mut R) {
    let size = canvas.size() as f32;
    match *decoration {
        Decoration::Craters {
            count,
            radius,
            depth,
        } => {
            let pit = Tint::Shade(1.0 - depth).resolve(base);
            let rim = Tint::Shade(1.0 + depth * 0.5).resolve(base);
            for _ in 0..count {
                let x = rng.gen_range(0.0..size);
                let y = rng.gen_range(0.0..size);
                let r = sample(rng, radius) * size;
                canvas.circle(x, y, r * 1.25, rim, 0.35);
                canvas.circle(x, y, r, pit, 0.6);
            }
        }
        Decoration::Bands {
            count,
            height,
            spread,
            alpha,
        } => {
            for _ in 0..count {
                let y = rng.gen_range(0.0..size);
                let h = (sample(rng, height) * size).max(1.0);
                let shade = 1.0 + rng.gen_range(-spread..=spread);
                canvas.rect(0.0, y, size, h, Tint::Shade(shade).resolve(base), alpha);
            }
        }
        Decoration::PolarCaps {
            extent,
            tint,
            alpha,
        } => {
            let color = tint.resolve(base);
            let depth = extent * size;
            // Ragged lower edge so the caps do not read as straight bars
            for step in 0..8 {
                let d = depth * (1.0 - step as f32 * 0.1) + rng.gen_range(-1.0..1.0);
                let a = alpha * (0.3 + step as f32 * 0.1);
                canvas.rect(0.0, 0.0, size, d, color, a);
                canvas.rect(0.0, size - d, size, d, color, a);
            }
        }
        Decoration::Storm {
            center,
            radii,
            tint,
            alpha,
        } => {
            let jitter = 0.03 * size;
            let cx = center.0 * size + rng.gen_range(-jitter..=jitter);
            let cy = center.1 * size + rng.gen_range(-jitter..=jitter);
            let color = tint.resolve(base);
            canvas.soft_ellipse(cx, cy, radii.0 * size, radii.1 * size, color, alpha);
            canvas.soft_ellipse(cx, cy, radii.0 * size * 0.5, radii.1 * size * 0.5, color, alpha);
        }
        Decoration::Blobs {
            count,
            radius,
            tint,
            alpha,
        } => {
            let color = tint.resolve(base);
            for _ in 0..count {
                let x = rng.gen_range(0.0..size);
                let y = rng.gen_range(0.0..size);
                let r = sample(rng, radius) * size;
                let stretch = rng.gen_range(1.0..2.0);
                canvas.soft_ellipse(x, y, r * stretch, r, color, alpha);
            }
        }
        Decoration::Swirls {
            count,
            amplitude,
            thickness,
            tint,
            alpha,
        } => {
            let color = tint.resolve(base);
            for _ in 0..count {
                let y = rng.gen_range(0.0..size);
                let amp = sample(rng, amplitude) * size;
                let cycles = rng.gen_range(1..4) as f32;
                let phase = rng.gen_range(0.0..std::f32::consts::TAU);
                canvas.wave_stroke(y, amp, cycles, phase, thickness * size, color, alpha);
            }
        }
    }
}
