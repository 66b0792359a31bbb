//! Weapon forge: deterministic part-tree construction per category.
//!
//! Recipes are plain functions behind a dispatch table built once at first
//! use. Every recipe builds at unit scale; [`create_weapon`] applies the
//! caller's scale factor in a single pass over the finished tree.

pub mod recipes;

use std::collections::HashMap;
use std::sync::LazyLock;

use bevy::prelude::*;

use crate::catalog::WeaponCategory;
use crate::palette::{self, MaterialSpec};
use crate::parts::{PartNode, PartRole, PartShape, WeaponAsset, WeaponPart};

/// Scale must be a positive finite number
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ForgeError {
    #[error("weapon scale must be positive and finite, got {0}")]
    InvalidScale(f32),
}

/// Materials resolved for one forge call
pub struct RecipeMaterials {
    /// Striking part: blade, head, limbs
    pub blade: MaterialSpec,
    /// Grip side: handle shaft, pommel
    pub handle: MaterialSpec,
}

type RecipeFn = fn(&RecipeMaterials) -> Vec<PartNode>;

static RECIPES: LazyLock<HashMap<WeaponCategory, RecipeFn>> = LazyLock::new(|| {
    use WeaponCategory::*;
    let mut table: HashMap<WeaponCategory, RecipeFn> = HashMap::new();
    table.insert(Dagger, recipes::dagger as RecipeFn);
    table.insert(ShortSword, recipes::short_sword as RecipeFn);
    table.insert(LongSword, recipes::long_sword as RecipeFn);
    table.insert(Axe, recipes::axe as RecipeFn);
    table.insert(BattleAxe, recipes::battle_axe as RecipeFn);
    table.insert(Spear, recipes::spear as RecipeFn);
    table.insert(Mace, recipes::mace as RecipeFn);
    table.insert(WarHammer, recipes::war_hammer as RecipeFn);
    table.insert(Staff, recipes::staff as RecipeFn);
    table.insert(Bow, recipes::bow as RecipeFn);
    table.insert(Club, recipes::club as RecipeFn);
    table.insert(Scythe, recipes::scythe as RecipeFn);
    table
});

/// Build the part tree for `category`, scaled by `scale`.
///
/// Material overrides replace the category defaults for the striking part
/// and the grip side respectively; fixed accents (staff crystal, bow
/// string, mace studs) are unaffected.
///
/// Scale <= 0 (or non-finite) is a configuration error; everything else is
/// total over the closed category enum.
pub fn create_weapon(
    category: WeaponCategory,
    scale: f32,
    blade_material: Option<MaterialSpec>,
    handle_material: Option<MaterialSpec>,
) -> Result<WeaponAsset, ForgeError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ForgeError::InvalidScale(scale));
    }

    let materials = RecipeMaterials {
        blade: blade_material.unwrap_or_else(|| default_blade_material(category)),
        handle: handle_material.unwrap_or_else(|| default_handle_material(category)),
    };

    let recipe = RECIPES.get(&category).copied().unwrap_or_else(|| {
        // Closed enum; reaching this means the table lost an entry.
        error!("no recipe registered for {category:?}, using ShortSword");
        recipes::short_sword as RecipeFn
    });

    let mut asset = WeaponAsset {
        name: category.ident().to_string(),
        category,
        scale: 1.0,
        nodes: recipe(&materials),
    };
    asset.scale_by(scale);

    info!(
        "forged {} at scale {scale} ({} parts)",
        asset.name,
        asset.solid_count()
    );
    Ok(asset)
}

fn default_blade_material(category: WeaponCategory) -> MaterialSpec {
    match category {
        // Wooden striking parts
        WeaponCategory::Staff | WeaponCategory::Bow | WeaponCategory::Club => palette::wood(None),
        _ => palette::metal(palette::steel_gray()),
    }
}

fn default_handle_material(category: WeaponCategory) -> MaterialSpec {
    match category {
        // Leather-wrapped grips on the sword family and the bow riser
        WeaponCategory::Dagger
        | WeaponCategory::ShortSword
        | WeaponCategory::LongSword
        | WeaponCategory::Bow => palette::leather(None),
        _ => palette::wood(None),
    }
}

// ---------------------------------------------------------------
// Shared construction helpers
// ---------------------------------------------------------------

pub(crate) fn solid(
    name: &str,
    role: PartRole,
    shape: PartShape,
    material: MaterialSpec,
    offset: Vec3,
) -> PartNode {
    solid_rotated(name, role, shape, material, offset, Quat::IDENTITY)
}

pub(crate) fn solid_rotated(
    name: &str,
    role: PartRole,
    shape: PartShape,
    material: MaterialSpec,
    offset: Vec3,
    rotation: Quat,
) -> PartNode {
    PartNode::Solid(WeaponPart {
        name: name.to_string(),
        role,
        shape,
        material,
        offset,
        rotation,
    })
}

/// Grip cylinder spanning `[-length, 0]` on Z
pub(crate) fn grip(length: f32, radius: f32, material: MaterialSpec) -> PartNode {
    solid(
        "Handle",
        PartRole::Grip,
        PartShape::Cylinder { radius, length },
        material,
        Vec3::new(0.0, 0.0, -length / 2.0),
    )
}

/// Pommel cap just below a grip of `grip_length`
pub(crate) fn pommel(
    grip_length: f32,
    radius: f32,
    length: f32,
    material: MaterialSpec,
) -> PartNode {
    solid(
        "Pommel",
        PartRole::Pommel,
        PartShape::Cylinder { radius, length },
        material,
        Vec3::new(0.0, 0.0, -grip_length - length / 2.0),
    )
}

/// Cross guard resting on the grip plane (sits at +half thickness so the
/// handle/striking split stays exact)
pub(crate) fn cross_guard(width: f32, height: f32, thickness: f32, material: MaterialSpec) -> PartNode {
    solid(
        "Guard",
        PartRole::Guard,
        PartShape::Block {
            extents: Vec3::new(width, height, thickness),
        },
        material,
        Vec3::new(0.0, 0.0, thickness / 2.0),
    )
}

/// Shaft section spanning `[0, length]` on Z
pub(crate) fn fore_shaft(length: f32, radius: f32, material: MaterialSpec) -> PartNode {
    solid(
        "Shaft",
        PartRole::Haft,
        PartShape::Cylinder { radius, length },
        material,
        Vec3::new(0.0, 0.0, length / 2.0),
    )
}

/// Connective collar centered at `z`, slightly flared toward +Z
pub(crate) fn collar(z: f32, radius: f32, length: f32, material: MaterialSpec) -> PartNode {
    solid(
        "Collar",
        PartRole::Collar,
        PartShape::Taper {
            radius_bottom: radius * 0.9,
            radius_top: radius,
            length,
        },
        material,
        Vec3::new(0.0, 0.0, z),
    )
}

/// Two-part taper: blade body starting at `base_z` plus a wedge tip.
/// Approximates a cutting point without curved-surface geometry.
pub(crate) fn blade_with_tip(
    base_z: f32,
    width: f32,
    thickness: f32,
    length: f32,
    tip_length: f32,
    material: MaterialSpec,
) -> [PartNode; 2] {
    [
        solid(
            "Blade",
            PartRole::Blade,
            PartShape::Block {
                extents: Vec3::new(width, thickness, length),
            },
            material,
            Vec3::new(0.0, 0.0, base_z + length / 2.0),
        ),
        solid(
            "BladeTip",
            PartRole::Tip,
            PartShape::Wedge {
                extents: Vec3::new(width, thickness, tip_length),
            },
            material,
            Vec3::new(0.0, 0.0, base_z + length + tip_length / 2.0),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_categories;
    use crate::parts::GripSide;

    #[test]
    fn test_invalid_scale_rejected() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let result = create_weapon(WeaponCategory::Dagger, bad, None, None);
            assert!(
                matches!(result, Err(ForgeError::InvalidScale(_))),
                "scale {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_every_category_has_recipe() {
        for &cat in list_categories() {
            assert!(
                RECIPES.contains_key(&cat),
                "{cat:?} missing from dispatch table"
            );
        }
    }

    #[test]
    fn test_root_name_is_canonical_ident() {
        for &cat in list_categories() {
            let asset = create_weapon(cat, 1.0, None, None).unwrap();
            assert_eq!(asset.name, cat.ident());
            assert_eq!(asset.category, cat);
        }
    }

    #[test]
    fn test_scale_linearity() {
        for &cat in list_categories() {
            let base = create_weapon(cat, 1.0, None, None).unwrap();
            let doubled = create_weapon(cat, 2.0, None, None).unwrap();
            let (lo1, hi1) = base.z_span();
            let (lo2, hi2) = doubled.z_span();
            assert!(
                (hi2 - hi1 * 2.0).abs() < 1e-4,
                "{cat:?} +Z span should double: {hi1} -> {hi2}"
            );
            assert!(
                (lo2 - lo1 * 2.0).abs() < 1e-4,
                "{cat:?} -Z span should double: {lo1} -> {lo2}"
            );
            assert_eq!(base.solid_count(), doubled.solid_count());
        }
    }

    #[test]
    fn test_grip_convention_all_categories() {
        let slack = crate::constants::GRIP_PLANE_SLACK;
        for &cat in list_categories() {
            let asset = create_weapon(cat, 1.0, None, None).unwrap();
            for part in asset.solids() {
                let (lo, hi) = part.z_range();
                match part.role.side() {
                    GripSide::Handle => assert!(
                        hi <= slack,
                        "{cat:?} part '{}' (handle side) reaches z={hi}",
                        part.name
                    ),
                    GripSide::Striking => assert!(
                        lo >= -slack,
                        "{cat:?} part '{}' (striking side) reaches z={lo}",
                        part.name
                    ),
                }
            }
        }
    }

    #[test]
    fn test_material_overrides_apply() {
        let tint = palette::metal(Color::srgb(1.0, 0.0, 0.0));
        let asset = create_weapon(WeaponCategory::LongSword, 1.0, Some(tint), None).unwrap();
        let blade = asset
            .solids()
            .into_iter()
            .find(|p| p.name == "Blade")
            .expect("long sword should have a blade");
        assert_eq!(blade.material, tint);

        let handle_tint = palette::wood(Some(Color::srgb(0.0, 0.0, 1.0)));
        let asset =
            create_weapon(WeaponCategory::Spear, 1.0, None, Some(handle_tint)).unwrap();
        let handle = asset
            .solids()
            .into_iter()
            .find(|p| p.name == "Handle")
            .expect("spear should have a handle");
        assert_eq!(handle.material, handle_tint);
    }

    #[test]
    fn test_default_materials_by_family() {
        let sword = create_weapon(WeaponCategory::ShortSword, 1.0, None, None).unwrap();
        let blade = sword
            .solids()
            .into_iter()
            .find(|p| p.name == "Blade")
            .unwrap();
        assert!(blade.material.metallic > 0.5, "sword blade defaults to metal");

        let club = create_weapon(WeaponCategory::Club, 1.0, None, None).unwrap();
        for part in club.solids() {
            assert_eq!(part.material.metallic, 0.0, "club is all wood");
        }
    }

    #[test]
    fn test_construction_deterministic() {
        let a = create_weapon(WeaponCategory::BattleAxe, 1.5, None, None).unwrap();
        let b = create_weapon(WeaponCategory::BattleAxe, 1.5, None, None).unwrap();
        assert_eq!(a, b, "same inputs should produce identical trees");
    }
}
