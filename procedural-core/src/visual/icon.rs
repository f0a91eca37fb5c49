use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::{Color, SpriteShape};
use crate::constants::{ICON_SIZE, SHADE_NOISE_SCALE, SHADE_OFFSET_RANGE};
use crate::rng::DeterministicRng;

/// Everything needed to draw one generated icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconSpec {
    pub border: Color,
    pub core: Vec<Color>,
    pub shape: SpriteShape,
    /// One noise offset per core color
    pub shade_offsets: Vec<(f32, f32)>,
}

/// Rendered RGBA icon, row-major
#[derive(Debug, Clone)]
pub struct IconImage {
    pub size: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl IconImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.size + x) as usize]
    }
}

impl IconSpec {
    /// Draw shade offsets from `rng`, two floats per core color
    pub fn roll(
        border: Color,
        core: Vec<Color>,
        shape: SpriteShape,
        rng: &mut DeterministicRng,
    ) -> Self {
        let shade_offsets = core
            .iter()
            .map(|_| {
                let x = rng.range_float(-SHADE_OFFSET_RANGE, SHADE_OFFSET_RANGE);
                let y = rng.range_float(-SHADE_OFFSET_RANGE, SHADE_OFFSET_RANGE);
                (x, y)
            })
            .collect();
        Self {
            border,
            core,
            shape,
            shade_offsets,
        }
    }

    /// Render at `size` x `size`. Shape masks are scaled from the 512px layout.
    pub fn render(&self, size: u32) -> IconImage {
        let perlin = Perlin::new(0);
        let size = size.max(1);
        let to_canvas = ICON_SIZE as f32 / size as f32;
        let mut samples = vec![0.0f32; self.core.len()];
        let mut pixels = Vec::with_capacity((size * size) as usize);

        for y in 0..size {
            for x in 0..size {
                let cx = (x as f32 + 0.5) * to_canvas;
                let cy = (y as f32 + 0.5) * to_canvas;

                let color = if self.shape.contains_core(cx, cy) {
                    let nx = x as f32 / size as f32 * SHADE_NOISE_SCALE;
                    let ny = y as f32 / size as f32 * SHADE_NOISE_SCALE;
                    let mut sum = 0.0;
                    for (i, sample) in samples.iter_mut().enumerate() {
                        let (ox, oy) = self.shade_offsets.get(i).copied().unwrap_or((0.0, 0.0));
                        let v = perlin.get([(ox + nx) as f64, (oy + ny) as f64]) as f32;
                        *sample = (v + 1.0) * 0.5;
                        sum += *sample;
                    }
                    let mut acc = Color::BLACK;
                    for (core, sample) in self.core.iter().zip(&samples) {
                        let mut c = core.scaled(*sample);
                        if sum > 1.0 {
                            c = c.scaled(1.0 / sum);
                        }
                        acc = acc + c;
                    }
                    Color { a: 1.0, ..acc }
                } else if self.shape.contains_border(cx, cy) {
                    self.border
                } else {
                    Color::CLEAR
                };
                pixels.push(color.to_rgba8());
            }
        }

        IconImage { size, pixels }
    }
}
