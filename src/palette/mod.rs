//! Material palette: reusable surface-appearance presets.
//!
//! Pure factories returning value-type descriptors; the spawn layer
//! converts them to `StandardMaterial`. Nothing here is cached; callers
//! may reuse a `MaterialSpec` freely, it is `Copy`.

use bevy::prelude::*;

/// Surface appearance for one weapon part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    pub base_color: Color,
    pub metallic: f32,
    pub perceptual_roughness: f32,
    pub reflectance: f32,
}

impl MaterialSpec {
    pub fn to_standard_material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.base_color,
            metallic: self.metallic,
            perceptual_roughness: self.perceptual_roughness,
            reflectance: self.reflectance,
            ..Default::default()
        }
    }
}

/// Polished metal: high reflectance, low roughness
pub fn metal(color: Color) -> MaterialSpec {
    MaterialSpec {
        base_color: color,
        metallic: 0.9,
        perceptual_roughness: 0.25,
        reflectance: 0.55,
    }
}

/// Wood: matte, zero reflectance. Defaults to a mid brown.
pub fn wood(color: Option<Color>) -> MaterialSpec {
    MaterialSpec {
        base_color: color.unwrap_or_else(wood_brown),
        metallic: 0.0,
        perceptual_roughness: 0.9,
        reflectance: 0.0,
    }
}

/// Leather: matte, slightly smoother than wood. Defaults to a dark brown.
pub fn leather(color: Option<Color>) -> MaterialSpec {
    MaterialSpec {
        base_color: color.unwrap_or_else(leather_brown),
        metallic: 0.0,
        perceptual_roughness: 0.85,
        reflectance: 0.0,
    }
}

// Default tints. Functions, not consts: `Color::srgb` conversion happens at
// call time and these are only touched during asset construction.

pub fn steel_gray() -> Color {
    Color::srgb(0.75, 0.77, 0.80)
}

pub fn dark_iron() -> Color {
    Color::srgb(0.35, 0.35, 0.38)
}

pub fn wood_brown() -> Color {
    Color::srgb(0.45, 0.30, 0.15)
}

pub fn leather_brown() -> Color {
    Color::srgb(0.33, 0.21, 0.12)
}

/// Staff crystal accent
pub fn amethyst() -> Color {
    Color::srgb(0.55, 0.35, 0.85)
}

/// Bow string accent
pub fn linen() -> Color {
    Color::srgb(0.92, 0.90, 0.82)
}
