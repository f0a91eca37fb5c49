//! Colors, sprite shapes and procedural icon specs.
//!
//! Generation only decides *what* an icon looks like (border color, core
//! colors, shape, shade offsets). [`IconSpec::render`] turns that into an
//! RGBA buffer with Perlin shading; the host is free to ignore it.

mod icon;

pub use icon::{IconImage, IconSpec};

use serde::{Deserialize, Serialize};

use crate::effect::ItemTier;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 0.92, 0.016);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn scaled(&self, k: f32) -> Color {
        Color::rgba(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::rgba(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

/// Border color for a generated item of `tier`; `None` for untiered items
pub fn tier_color(tier: ItemTier) -> Option<Color> {
    match tier {
        ItemTier::Tier1 => Some(Color::rgb(0.88, 0.89, 0.89)),
        ItemTier::Tier2 => Some(Color::rgb(0.47, 0.77, 0.26)),
        ItemTier::Tier3 => Some(Color::rgb(0.89, 0.31, 0.19)),
        ItemTier::Boss => Some(Color::rgb(0.78, 0.85, 0.16)),
        ItemTier::VoidTier1 | ItemTier::VoidTier2 | ItemTier::VoidTier3 | ItemTier::VoidBoss => {
            Some(Color::rgb(0.85, 0.28, 0.59))
        }
        ItemTier::Lunar => Some(Color::rgb(0.28, 0.88, 0.95)),
        ItemTier::Untiered => None,
    }
}

/// Border color for regular (non-lunar) equipment
pub const EQUIPMENT_COLOR: Color = Color::rgb(0.89, 0.57, 0.19);

/// Icon silhouette, picked deterministically from an effect's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteShape {
    Square,
    Diamond,
    Circle,
    Octagon,
}

impl SpriteShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteShape::Square => "square",
            SpriteShape::Diamond => "diamond",
            SpriteShape::Circle => "circle",
            SpriteShape::Octagon => "octagon",
        }
    }

    /// Whether `(x, y)` on a 512px canvas lies inside the core area
    pub fn contains_core(&self, x: f32, y: f32) -> bool {
        self.contains(x, y, 192.0)
    }

    /// Whether `(x, y)` on a 512px canvas lies inside the core plus border
    pub fn contains_border(&self, x: f32, y: f32) -> bool {
        self.contains(x, y, 208.0)
    }

    fn contains(&self, x: f32, y: f32, half: f32) -> bool {
        let dx = (x - 256.0).abs();
        let dy = (y - 256.0).abs();
        match self {
            // square half-widths are 128 (core) and 144 (border)
            SpriteShape::Square => dx < half - 64.0 && dy < half - 64.0,
            SpriteShape::Diamond => dx + dy < half,
            SpriteShape::Circle => dx * dx + dy * dy < half * half,
            SpriteShape::Octagon => dx < half && dy < half && dx + dy < half * 1.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors() {
        assert_eq!(tier_color(ItemTier::Tier1), Some(Color::rgb(0.88, 0.89, 0.89)));
        assert_eq!(tier_color(ItemTier::VoidTier2), tier_color(ItemTier::VoidBoss));
        assert_eq!(tier_color(ItemTier::Untiered), None);
    }

    #[test]
    fn test_shape_masks_centered() {
        for shape in [
            SpriteShape::Square,
            SpriteShape::Diamond,
            SpriteShape::Circle,
            SpriteShape::Octagon,
        ] {
            assert!(shape.contains_core(256.0, 256.0), "{} center", shape.as_str());
            assert!(!shape.contains_border(0.0, 0.0), "{} corner", shape.as_str());
        }
    }

    #[test]
    fn test_border_ring_outside_core() {
        // Point just past the square core edge but inside its border
        assert!(!SpriteShape::Square.contains_core(390.0, 256.0));
        assert!(SpriteShape::Square.contains_border(390.0, 256.0));
        assert!(!SpriteShape::Circle.contains_core(256.0 + 200.0, 256.0));
        assert!(SpriteShape::Circle.contains_border(256.0 + 200.0, 256.0));
    }

    #[test]
    fn test_color_quantize() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.5).to_rgba8(), [255, 0, 128, 255]);
        assert_eq!(Color::rgb(2.0, -1.0, 0.0).to_rgba8(), [255, 0, 0, 255]);
    }
}
