//! Minimal software raster used to paint surface textures.
//!
//! Pixels are opaque RGB in `[0, 1]`. Horizontal coordinates wrap, since the
//! image is mapped around a sphere; vertical coordinates are clipped.

use rand::Rng;

pub type Rgb = [f32; 3];

pub struct Canvas {
    size: u32,
    pixels: Vec<Rgb>,
}

fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

impl Canvas {
    /// Square canvas filled with a single color
    pub fn filled(size: u32, color: Rgb) -> Self {
        let size = size.max(1);
        Self {
            size,
            pixels: vec![color; (size * size) as usize],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[(y * self.size + x) as usize]
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        let size = self.size as i64;
        if y < 0 || y >= size {
            return;
        }
        let x = x.rem_euclid(size);
        let idx = (y * size + x) as usize;
        self.pixels[idx] = lerp(self.pixels[idx], color, alpha.clamp(0.0, 1.0));
    }

    /// Hard-edged disc
    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Ellipse whose opacity falls off quadratically toward its edge
    pub fn soft_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgb, alpha: f32) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let x0 = (cx - rx).floor() as i64;
        let x1 = (cx + rx).ceil() as i64;
        let y0 = (cy - ry).floor() as i64;
        let y1 = (cy + ry).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                let d2 = dx * dx + dy * dy;
                if d2 < 1.0 {
                    self.blend(x, y, color, alpha * (1.0 - d2));
                }
            }
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, alpha: f32) {
        let x0 = x.floor() as i64;
        let x1 = (x + width).ceil() as i64;
        let y0 = y.floor() as i64;
        let y1 = (y + height).ceil() as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, alpha);
            }
        }
    }

    /// Horizontal sine stroke across the full width
    pub fn wave_stroke(
        &mut self,
        y: f32,
        amplitude: f32,
        cycles: f32,
        phase: f32,
        thickness: f32,
        color: Rgb,
        alpha: f32,
    ) {
        let size = self.size as f32;
        let half = (thickness * 0.5).max(0.5);
        for x in 0..self.size {
            let t = x as f32 / size;
            let center = y + amplitude * (t * cycles * std::f32::consts::TAU + phase).sin();
            let start = (center - half).floor() as i64;
            let end = (center + half).ceil() as i64;
            for py in start..end {
                self.blend(x as i64, py, color, alpha);
            }
        }
    }

    /// Paint concentric color stops from the center outward.
    ///
    /// Stop positions are fractions of the half-size; pixels beyond the last
    /// stop take its color.
    pub fn radial_gradient(&mut self, stops: &[(f32, Rgb)]) {
        let Some(&(_, last)) = stops.last() else {
            return;
        };
        let half = self.size as f32 * 0.5;
        for y in 0..self.size {
            for x in 0..self.size {
                let dx = x as f32 + 0.5 - half;
                let dy = y as f32 + 0.5 - half;
                let d = (dx * dx + dy * dy).sqrt() / half;
                let mut color = last;
                for pair in stops.windows(2) {
                    let (p0, c0) = pair[0];
                    let (p1, c1) = pair[1];
                    if d <= p0 {
                        color = c0;
                        break;
                    }
                    if d <= p1 {
                        color = lerp(c0, c1, (d - p0) / (p1 - p0).max(f32::EPSILON));
                        break;
                    }
                }
                let idx = (y * self.size + x) as usize;
                self.pixels[idx] = color;
            }
        }
    }

    /// Uniform grain: every pixel is pulled toward a random gray by `alpha`
    pub fn grain<R: Rng>(&mut self, rng: &mut R, alpha: f32) {
        for px in self.pixels.iter_mut() {
            let v: f32 = rng.r#gen();
            *px = lerp(*px, [v, v, v], alpha);
        }
    }

    /// Pack into RGBA8, fully opaque
    pub fn into_rgba8(self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for [r, g, b] in self.pixels {
            data.push((r.clamp(0.0, 1.0) * 255.0).round() as u8);
            data.push((g.clamp(0.0, 1.0) * 255.0).round() as u8);
            data.push((b.clamp(0.0, 1.0) * 255.0).round() as u8);
            data.push(255);
        }
        data
    }
}
