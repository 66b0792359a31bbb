//! Per-category construction recipes.
//!
//! Every recipe builds at unit scale with the grip at the origin: handle
//! mass toward -Z, striking mass toward +Z. Heads and blades follow the
//! two-part taper pattern (body + wedge/cone tip), and every handle-to-head
//! transition gets a connective collar so there is no visible gap at any
//! scale.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use super::{blade_with_tip, collar, cross_guard, fore_shaft, grip, pommel, solid, solid_rotated, RecipeMaterials};
use crate::palette::{self, leather, metal};
use crate::parts::{PartNode, PartRole, PartShape};

/// Bow limb length from grip to tip
const BOW_LIMB_LENGTH: f32 = 0.55;
/// Forward curve of each limb, radians
const BOW_CURVE_ANGLE: f32 = 0.35;
/// Downward sweep of the scythe blade assembly, radians
const SCYTHE_DROOP: f32 = 0.35;

pub(crate) fn dagger(m: &RecipeMaterials) -> Vec<PartNode> {
    let mut nodes = vec![
        grip(0.22, 0.035, m.handle),
        pommel(0.22, 0.045, 0.035, metal(palette::dark_iron())),
        cross_guard(0.12, 0.045, 0.03, metal(palette::dark_iron())),
    ];
    nodes.extend(blade_with_tip(0.03, 0.05, 0.014, 0.30, 0.07, m.blade));
    nodes
}

pub(crate) fn short_sword(m: &RecipeMaterials) -> Vec<PartNode> {
    let mut nodes = vec![
        grip(0.28, 0.04, m.handle),
        pommel(0.28, 0.055, 0.04, metal(palette::dark_iron())),
        cross_guard(0.20, 0.05, 0.035, metal(palette::dark_iron())),
    ];
    nodes.extend(blade_with_tip(0.035, 0.07, 0.016, 0.52, 0.11, m.blade));
    nodes
}

pub(crate) fn long_sword(m: &RecipeMaterials) -> Vec<PartNode> {
    let mut nodes = vec![
        grip(0.40, 0.042, m.handle),
        pommel(0.40, 0.06, 0.05, metal(palette::dark_iron())),
        cross_guard(0.28, 0.055, 0.04, metal(palette::dark_iron())),
    ];
    nodes.extend(blade_with_tip(0.04, 0.08, 0.018, 0.82, 0.14, m.blade));
    nodes
}

pub(crate) fn axe(m: &RecipeMaterials) -> Vec<PartNode> {
    vec![
        grip(0.55, 0.045, m.handle),
        fore_shaft(0.48, 0.045, m.handle),
        collar(0.50, 0.058, 0.10, m.blade),
        solid(
            "Head",
            PartRole::Head,
            PartShape::Block {
                extents: Vec3::new(0.20, 0.07, 0.15),
            },
            m.blade,
            Vec3::new(0.14, 0.0, 0.50),
        ),
        // Cutting edge tapers outward along +X; the wedge's own edge runs
        // vertically after the quarter turn
        solid_rotated(
            "Edge",
            PartRole::Blade,
            PartShape::Wedge {
                extents: Vec3::new(0.18, 0.05, 0.10),
            },
            m.blade,
            Vec3::new(0.29, 0.0, 0.50),
            Quat::from_rotation_y(FRAC_PI_2),
        ),
    ]
}

pub(crate) fn battle_axe(m: &RecipeMaterials) -> Vec<PartNode> {
    let mut nodes = vec![
        grip(0.62, 0.048, m.handle),
        fore_shaft(0.50, 0.048, m.handle),
        collar(0.52, 0.062, 0.10, m.blade),
    ];
    // Mirrored heads: only the X offset flips, every other parameter is shared
    for side in [-1.0f32, 1.0] {
        let name = if side < 0.0 { "HeadLeft" } else { "HeadRight" };
        nodes.push(PartNode::Group {
            name: name.to_string(),
            offset: Vec3::new(side * 0.15, 0.0, 0.55),
            rotation: Quat::IDENTITY,
            children: vec![
                solid(
                    "Head",
                    PartRole::Head,
                    PartShape::Block {
                        extents: Vec3::new(0.22, 0.075, 0.18),
                    },
                    m.blade,
                    Vec3::ZERO,
                ),
                solid_rotated(
                    "Edge",
                    PartRole::Blade,
                    PartShape::Wedge {
                        extents: Vec3::new(0.20, 0.055, 0.09),
                    },
                    m.blade,
                    Vec3::new(side * 0.16, 0.0, 0.0),
                    Quat::from_rotation_y(side * FRAC_PI_2),
                ),
            ],
        });
    }
    nodes.push(solid(
        "Spike",
        PartRole::Tip,
        PartShape::Cone {
            radius: 0.05,
            length: 0.20,
        },
        m.blade,
        Vec3::new(0.0, 0.0, 0.74),
    ));
    nodes
}

pub(crate) fn spear(m: &RecipeMaterials) -> Vec<PartNode> {
    vec![
        grip(0.50, 0.035, m.handle),
        fore_shaft(1.00, 0.035, m.handle),
        collar(1.02, 0.045, 0.08, m.blade),
        solid(
            "Tip",
            PartRole::Tip,
            PartShape::Cone {
                radius: 0.055,
                length: 0.30,
            },
            m.blade,
            Vec3::new(0.0, 0.0, 1.21),
        ),
    ]
}

pub(crate) fn mace(m: &RecipeMaterials) -> Vec<PartNode> {
    let mut nodes = vec![
        grip(0.34, 0.04, m.handle),
        fore_shaft(0.36, 0.04, m.handle),
        collar(0.38, 0.05, 0.08, m.blade),
        solid(
            "Head",
            PartRole::Head,
            PartShape::Cylinder {
                radius: 0.11,
                length: 0.18,
            },
            m.blade,
            Vec3::new(0.0, 0.0, 0.51),
        ),
    ];
    // Four radial studs around the head drum
    for i in 0..4 {
        let swing = Quat::from_rotation_z(i as f32 * FRAC_PI_2);
        nodes.push(solid_rotated(
            &format!("Stud{i}"),
            PartRole::Accent,
            PartShape::Block {
                extents: Vec3::new(0.10, 0.05, 0.07),
            },
            metal(palette::dark_iron()),
            swing * Vec3::new(0.14, 0.0, 0.0) + Vec3::new(0.0, 0.0, 0.51),
            swing,
        ));
    }
    nodes
}

pub(crate) fn war_hammer(m: &RecipeMaterials) -> Vec<PartNode> {
    vec![
        grip(0.52, 0.045, m.handle),
        fore_shaft(0.50, 0.045, m.handle),
        collar(0.52, 0.058, 0.10, m.blade),
        solid(
            "Head",
            PartRole::Head,
            PartShape::Block {
                extents: Vec3::new(0.26, 0.10, 0.14),
            },
            m.blade,
            Vec3::new(0.0, 0.0, 0.60),
        ),
        // Striking face toward +X, counter-spike toward -X
        solid_rotated(
            "Face",
            PartRole::Head,
            PartShape::Cylinder {
                radius: 0.065,
                length: 0.10,
            },
            m.blade,
            Vec3::new(0.16, 0.0, 0.60),
            Quat::from_rotation_y(FRAC_PI_2),
        ),
        solid_rotated(
            "Spike",
            PartRole::Tip,
            PartShape::Cone {
                radius: 0.05,
                length: 0.16,
            },
            m.blade,
            Vec3::new(-0.19, 0.0, 0.60),
            Quat::from_rotation_y(-FRAC_PI_2),
        ),
    ]
}

pub(crate) fn staff(m: &RecipeMaterials) -> Vec<PartNode> {
    vec![
        grip(0.55, 0.035, m.handle),
        solid(
            "GripWrap",
            PartRole::Grip,
            PartShape::Cylinder {
                radius: 0.04,
                length: 0.18,
            },
            leather(None),
            Vec3::new(0.0, 0.0, -0.10),
        ),
        solid(
            "Ferrule",
            PartRole::Pommel,
            PartShape::Taper {
                radius_bottom: 0.02,
                radius_top: 0.04,
                length: 0.08,
            },
            metal(palette::dark_iron()),
            Vec3::new(0.0, 0.0, -0.59),
        ),
        fore_shaft(0.85, 0.035, m.blade),
        collar(0.87, 0.045, 0.06, metal(palette::dark_iron())),
        PartNode::Group {
            name: "Crystal".to_string(),
            offset: Vec3::new(0.0, 0.0, 0.97),
            rotation: Quat::IDENTITY,
            children: vec![
                solid(
                    "CrystalUpper",
                    PartRole::Accent,
                    PartShape::Cone {
                        radius: 0.055,
                        length: 0.12,
                    },
                    metal(palette::amethyst()),
                    Vec3::new(0.0, 0.0, 0.06),
                ),
                solid_rotated(
                    "CrystalLower",
                    PartRole::Accent,
                    PartShape::Cone {
                        radius: 0.055,
                        length: 0.10,
                    },
                    metal(palette::amethyst()),
                    Vec3::new(0.0, 0.0, -0.05),
                    Quat::from_rotation_x(PI),
                ),
            ],
        },
    ]
}

pub(crate) fn bow(m: &RecipeMaterials) -> Vec<PartNode> {
    let (sin, cos) = BOW_CURVE_ANGLE.sin_cos();
    let mut nodes = vec![solid_rotated(
        "Grip",
        PartRole::Grip,
        PartShape::Cylinder {
            radius: 0.035,
            length: 0.24,
        },
        m.handle,
        Vec3::ZERO,
        Quat::from_rotation_x(-FRAC_PI_2),
    )];
    // Mirrored limbs swept forward by the curve angle
    for side in [-1.0f32, 1.0] {
        let name = if side < 0.0 { "LimbLower" } else { "LimbUpper" };
        let direction = Vec3::new(0.0, side * cos, sin);
        nodes.push(solid_rotated(
            name,
            PartRole::Limb,
            PartShape::Taper {
                radius_bottom: 0.030,
                radius_top: 0.016,
                length: BOW_LIMB_LENGTH,
            },
            m.blade,
            direction * (BOW_LIMB_LENGTH / 2.0),
            Quat::from_rotation_x(-side * (FRAC_PI_2 - BOW_CURVE_ANGLE)),
        ));
    }
    // String spans the true limb tips; both derive from the same
    // length/angle pair, so retuning the curve keeps them attached
    nodes.push(solid_rotated(
        "BowString",
        PartRole::BowString,
        PartShape::Cylinder {
            radius: 0.007,
            length: 2.0 * BOW_LIMB_LENGTH * cos,
        },
        leather(Some(palette::linen())),
        Vec3::new(0.0, 0.0, BOW_LIMB_LENGTH * sin),
        Quat::from_rotation_x(-FRAC_PI_2),
    ));
    nodes
}

pub(crate) fn club(m: &RecipeMaterials) -> Vec<PartNode> {
    vec![
        grip(0.30, 0.045, m.handle),
        solid(
            "Body",
            PartRole::Head,
            PartShape::Taper {
                radius_bottom: 0.05,
                radius_top: 0.095,
                length: 0.62,
            },
            m.blade,
            Vec3::new(0.0, 0.0, 0.31),
        ),
        solid(
            "Cap",
            PartRole::Tip,
            PartShape::Taper {
                radius_bottom: 0.095,
                radius_top: 0.055,
                length: 0.10,
            },
            m.blade,
            Vec3::new(0.0, 0.0, 0.67),
        ),
    ]
}

pub(crate) fn scythe(m: &RecipeMaterials) -> Vec<PartNode> {
    vec![
        grip(0.60, 0.04, m.handle),
        fore_shaft(0.88, 0.04, m.handle),
        collar(0.90, 0.05, 0.08, metal(palette::dark_iron())),
        // Blade assembly sweeps out along +X with a slight droop
        PartNode::Group {
            name: "BladeMount".to_string(),
            offset: Vec3::new(0.0, 0.0, 0.94),
            rotation: Quat::from_rotation_y(SCYTHE_DROOP),
            children: vec![
                solid(
                    "Blade",
                    PartRole::Blade,
                    PartShape::Block {
                        extents: Vec3::new(0.52, 0.016, 0.10),
                    },
                    m.blade,
                    Vec3::new(0.28, 0.0, 0.0),
                ),
                solid_rotated(
                    "Tip",
                    PartRole::Tip,
                    PartShape::Wedge {
                        extents: Vec3::new(0.10, 0.016, 0.16),
                    },
                    m.blade,
                    Vec3::new(0.60, 0.0, 0.0),
                    Quat::from_rotation_y(FRAC_PI_2),
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WeaponCategory;
    use crate::forge::create_weapon;
    use crate::parts::{PartShape, WeaponAsset, WeaponPart};

    fn build(category: WeaponCategory) -> WeaponAsset {
        create_weapon(category, 1.0, None, None).unwrap()
    }

    fn find<'a>(parts: &'a [WeaponPart], name: &str) -> &'a WeaponPart {
        parts
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("part '{name}' not found"))
    }

    #[test]
    fn test_sword_family_has_full_hilt() {
        for cat in [
            WeaponCategory::Dagger,
            WeaponCategory::ShortSword,
            WeaponCategory::LongSword,
        ] {
            let parts = build(cat).solids();
            for name in ["Handle", "Pommel", "Guard", "Blade", "BladeTip"] {
                find(&parts, name);
            }
        }
    }

    #[test]
    fn test_blades_lengthen_up_the_family() {
        let blade_len = |cat| {
            let asset = build(cat);
            let parts = asset.solids();
            find(&parts, "Blade").shape.length()
        };
        assert!(blade_len(WeaponCategory::Dagger) < blade_len(WeaponCategory::ShortSword));
        assert!(blade_len(WeaponCategory::ShortSword) < blade_len(WeaponCategory::LongSword));
    }

    #[test]
    fn test_hafted_weapons_have_collar() {
        for cat in [
            WeaponCategory::Axe,
            WeaponCategory::BattleAxe,
            WeaponCategory::Spear,
            WeaponCategory::Mace,
            WeaponCategory::WarHammer,
            WeaponCategory::Staff,
            WeaponCategory::Scythe,
        ] {
            let asset = build(cat);
            let parts = asset.solids();
            let collar = find(&parts, "Collar");
            let shaft = find(&parts, "Shaft");
            // No gap: the collar interval overlaps the shaft's top
            let (collar_lo, _) = collar.z_range();
            let (_, shaft_hi) = shaft.z_range();
            assert!(
                collar_lo <= shaft_hi,
                "{cat:?}: collar starts at {collar_lo} above shaft end {shaft_hi}"
            );
        }
    }

    #[test]
    fn test_axe_head_hangs_to_one_side() {
        let asset = build(WeaponCategory::Axe);
        let parts = asset.solids();
        assert!(find(&parts, "Head").offset.x > 0.0);
        assert!(find(&parts, "Edge").offset.x > find(&parts, "Head").offset.x);
    }

    #[test]
    fn test_battle_axe_heads_mirror_in_x_only() {
        let asset = build(WeaponCategory::BattleAxe);
        let parts = asset.solids();
        let heads: Vec<&WeaponPart> = parts.iter().filter(|p| p.name == "Head").collect();
        let edges: Vec<&WeaponPart> = parts.iter().filter(|p| p.name == "Edge").collect();
        assert_eq!(heads.len(), 2, "double-headed axe needs two heads");
        assert_eq!(edges.len(), 2);
        for pair in [heads, edges] {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.offset.x + b.offset.x).abs() < 1e-6, "X should mirror");
            assert_eq!(a.offset.y, b.offset.y);
            assert_eq!(a.offset.z, b.offset.z);
            assert_eq!(a.shape, b.shape, "all non-X parameters are shared");
        }
    }

    #[test]
    fn test_spear_tip_is_farthest_part() {
        let asset = build(WeaponCategory::Spear);
        let parts = asset.solids();
        let tip = find(&parts, "Tip");
        let (_, tip_hi) = tip.z_range();
        for part in &parts {
            let (_, hi) = part.z_range();
            assert!(hi <= tip_hi + 1e-6, "'{}' outreaches the spear tip", part.name);
        }
    }

    #[test]
    fn test_mace_studs_ring_the_head() {
        let asset = build(WeaponCategory::Mace);
        let parts = asset.solids();
        let head = find(&parts, "Head");
        let studs: Vec<&WeaponPart> = parts
            .iter()
            .filter(|p| p.name.starts_with("Stud"))
            .collect();
        assert_eq!(studs.len(), 4);
        let radius = studs[0].offset.truncate().length();
        for stud in &studs {
            assert_eq!(stud.offset.z, head.offset.z, "studs sit on the drum");
            assert!(
                (stud.offset.truncate().length() - radius).abs() < 1e-6,
                "studs share one radius"
            );
        }
    }

    #[test]
    fn test_war_hammer_face_opposes_spike() {
        let asset = build(WeaponCategory::WarHammer);
        let parts = asset.solids();
        let face = find(&parts, "Face");
        let spike = find(&parts, "Spike");
        assert!(face.offset.x > 0.0);
        assert!(spike.offset.x < 0.0);
        assert_eq!(face.offset.z, spike.offset.z);
    }

    #[test]
    fn test_staff_crystal_tops_the_shaft() {
        let asset = build(WeaponCategory::Staff);
        let parts = asset.solids();
        let shaft = find(&parts, "Shaft");
        for name in ["CrystalUpper", "CrystalLower"] {
            let (lo, _) = find(&parts, name).z_range();
            let (_, shaft_hi) = shaft.z_range();
            assert!(lo >= shaft_hi - 0.05, "crystal should sit above the shaft");
        }
        let ferrule = find(&parts, "Ferrule");
        let (_, hi) = ferrule.z_range();
        assert!(hi <= -0.5, "ferrule caps the bottom end");
    }

    #[test]
    fn test_bow_string_spans_true_limb_tips() {
        let asset = build(WeaponCategory::Bow);
        let parts = asset.solids();
        let string = find(&parts, "BowString");
        let upper_tip = find(&parts, "LimbUpper").top_point();
        let lower_tip = find(&parts, "LimbLower").top_point();

        // Tips computed from limb geometry, endpoints from string geometry
        let end_a = string.top_point();
        let end_b = string.bottom_point();
        assert!((end_a - upper_tip).length() < 1e-4, "string misses upper tip");
        assert!((end_b - lower_tip).length() < 1e-4, "string misses lower tip");

        // Symmetry about the grip plane
        assert!((upper_tip.y + lower_tip.y).abs() < 1e-5);
        assert!((upper_tip.z - lower_tip.z).abs() < 1e-5);

        // Midpoint depth follows limb_length * sin(curve_angle)
        let midpoint = (end_a + end_b) / 2.0;
        let expected_z = BOW_LIMB_LENGTH * BOW_CURVE_ANGLE.sin();
        assert!((midpoint.z - expected_z).abs() < 1e-5);
        assert!(midpoint.y.abs() < 1e-5);
    }

    #[test]
    fn test_bow_string_tracks_retuned_curve() {
        // The derivation, not the current constants: a different angle
        // still lands the string on the tips
        let (sin, cos) = 0.5f32.sin_cos();
        let tip = Vec3::new(0.0, cos, sin) * 0.7;
        let string_mid = Vec3::new(0.0, 0.0, 0.7 * sin);
        let half_len = 0.7 * cos;
        assert!((string_mid + Vec3::new(0.0, half_len, 0.0) - tip).length() < 1e-6);
    }

    #[test]
    fn test_club_widens_toward_the_business_end() {
        let asset = build(WeaponCategory::Club);
        let parts = asset.solids();
        match find(&parts, "Body").shape {
            PartShape::Taper {
                radius_bottom,
                radius_top,
                ..
            } => assert!(radius_top > radius_bottom, "club should widen upward"),
            ref other => panic!("club body should be a taper, got {other:?}"),
        }
    }

    #[test]
    fn test_scythe_blade_sweeps_sideways() {
        let asset = build(WeaponCategory::Scythe);
        let parts = asset.solids();
        let blade = find(&parts, "Blade");
        assert!(blade.offset.x > 0.2, "blade extends along +X");
        assert!(blade.offset.z > 0.7, "blade mounts near the shaft top");
        assert!(
            blade.offset.z < 0.94,
            "droop should pull the blade below the mount"
        );
    }
}
