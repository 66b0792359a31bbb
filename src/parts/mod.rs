//! Part model: primitive solids composed into a grip-centered tree.
//!
//! A [`WeaponAsset`] is a plain owned value: an ordered tree of
//! [`WeaponPart`] records (shape + material + local transform) with no
//! engine handles inside. The spawn layer realizes it as entities; the
//! attachment resolver re-parents the realized root into a rig.
//!
//! Local convention shared by every recipe: the grip sits at the origin,
//! handle mass extends toward -Z, striking mass toward +Z. Shape long axes
//! run along the part's local +Z before its own rotation is applied.

use bevy::prelude::*;

use crate::catalog::WeaponCategory;
use crate::palette::MaterialSpec;

/// Primitive solid, long axis along local +Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    Cylinder {
        radius: f32,
        length: f32,
    },
    /// Apex toward +Z
    Cone {
        radius: f32,
        length: f32,
    },
    /// Tapered cylinder; `radius_top` is the +Z end
    Taper {
        radius_bottom: f32,
        radius_top: f32,
        length: f32,
    },
    Block {
        extents: Vec3,
    },
    /// Triangular prism: full X/Y cross-section at the -Z face collapsing
    /// to an X-aligned edge at the +Z face
    Wedge {
        extents: Vec3,
    },
}

impl PartShape {
    /// Half-extents of the local axis-aligned bounding box
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            PartShape::Cylinder { radius, length } | PartShape::Cone { radius, length } => {
                Vec3::new(radius, radius, length / 2.0)
            }
            PartShape::Taper {
                radius_bottom,
                radius_top,
                length,
            } => {
                let r = radius_bottom.max(radius_top);
                Vec3::new(r, r, length / 2.0)
            }
            PartShape::Block { extents } | PartShape::Wedge { extents } => extents / 2.0,
        }
    }

    /// Length along the local +Z axis
    pub fn length(&self) -> f32 {
        match *self {
            PartShape::Cylinder { length, .. }
            | PartShape::Cone { length, .. }
            | PartShape::Taper { length, .. } => length,
            PartShape::Block { extents } | PartShape::Wedge { extents } => extents.z,
        }
    }

    fn scaled(self, s: f32) -> Self {
        match self {
            PartShape::Cylinder { radius, length } => PartShape::Cylinder {
                radius: radius * s,
                length: length * s,
            },
            PartShape::Cone { radius, length } => PartShape::Cone {
                radius: radius * s,
                length: length * s,
            },
            PartShape::Taper {
                radius_bottom,
                radius_top,
                length,
            } => PartShape::Taper {
                radius_bottom: radius_bottom * s,
                radius_top: radius_top * s,
                length: length * s,
            },
            PartShape::Block { extents } => PartShape::Block { extents: extents * s },
            PartShape::Wedge { extents } => PartShape::Wedge { extents: extents * s },
        }
    }
}

/// Which side of the grip plane a part belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripSide {
    Handle,
    Striking,
}

/// Structural role of a part within its weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    Grip,
    Pommel,
    Guard,
    /// Shaft section above the grip (axes, spears, staves)
    Haft,
    /// Connective piece at a handle-to-head transition
    Collar,
    Blade,
    Head,
    Tip,
    /// Bow limb
    Limb,
    BowString,
    /// Decorative: studs, crystals, wraps
    Accent,
}

impl PartRole {
    pub fn side(self) -> GripSide {
        match self {
            PartRole::Grip | PartRole::Pommel => GripSide::Handle,
            _ => GripSide::Striking,
        }
    }
}

/// One solid with its local transform relative to the grip origin
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponPart {
    pub name: String,
    pub role: PartRole,
    pub shape: PartShape,
    pub material: MaterialSpec,
    pub offset: Vec3,
    pub rotation: Quat,
}

impl WeaponPart {
    /// Conservative world-Z interval occupied by this part.
    ///
    /// Computed from the rotated local bounding box; exact for axis-aligned
    /// parts, a slight overestimate for rotated round ones.
    pub fn z_range(&self) -> (f32, f32) {
        let h = self.shape.half_extents();
        let z_row = Mat3::from_quat(self.rotation).row(2).abs();
        let half = z_row.dot(h);
        (self.offset.z - half, self.offset.z + half)
    }

    /// World-space point at the +Z end of the shape's long axis
    pub fn top_point(&self) -> Vec3 {
        self.offset + self.rotation * Vec3::new(0.0, 0.0, self.shape.length() / 2.0)
    }

    /// World-space point at the -Z end of the shape's long axis
    pub fn bottom_point(&self) -> Vec3 {
        self.offset - self.rotation * Vec3::new(0.0, 0.0, self.shape.length() / 2.0)
    }
}

/// Node in the part tree: a solid or a named sub-assembly
#[derive(Debug, Clone, PartialEq)]
pub enum PartNode {
    Solid(WeaponPart),
    Group {
        name: String,
        offset: Vec3,
        rotation: Quat,
        children: Vec<PartNode>,
    },
}

impl PartNode {
    fn scale_by(&mut self, s: f32) {
        match self {
            PartNode::Solid(part) => {
                part.offset *= s;
                part.shape = part.shape.scaled(s);
            }
            PartNode::Group {
                offset, children, ..
            } => {
                *offset *= s;
                for child in children {
                    child.scale_by(s);
                }
            }
        }
    }
}

/// An ordered part tree rooted at the grip origin
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponAsset {
    /// Canonical category identifier, used as the root entity's name
    pub name: String,
    pub category: WeaponCategory,
    pub scale: f32,
    pub nodes: Vec<PartNode>,
}

impl WeaponAsset {
    /// Multiply every linear dimension and offset in the tree by `s`.
    ///
    /// This is the only scale path: recipes always build at unit scale, so
    /// no category-specific code can apply a partial multiplier.
    pub fn scale_by(&mut self, s: f32) {
        self.scale *= s;
        for node in &mut self.nodes {
            node.scale_by(s);
        }
    }

    /// Flattened copies of every solid with group transforms applied
    pub fn solids(&self) -> Vec<WeaponPart> {
        let mut out = Vec::new();
        for node in &self.nodes {
            flatten_into(node, Vec3::ZERO, Quat::IDENTITY, &mut out);
        }
        out
    }

    pub fn solid_count(&self) -> usize {
        self.solids().len()
    }

    /// World-Z interval spanned by the whole asset
    pub fn z_span(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for part in self.solids() {
            let (lo, hi) = part.z_range();
            min = min.min(lo);
            max = max.max(hi);
        }
        (min, max)
    }
}

fn flatten_into(node: &PartNode, offset: Vec3, rotation: Quat, out: &mut Vec<WeaponPart>) {
    match node {
        PartNode::Solid(part) => {
            let mut flat = part.clone();
            flat.offset = offset + rotation * part.offset;
            flat.rotation = rotation * part.rotation;
            out.push(flat);
        }
        PartNode::Group {
            offset: group_offset,
            rotation: group_rotation,
            children,
            ..
        } => {
            let offset = offset + rotation * *group_offset;
            let rotation = rotation * *group_rotation;
            for child in children {
                flatten_into(child, offset, rotation, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;
    use std::f32::consts::FRAC_PI_2;

    fn part(shape: PartShape, offset: Vec3, rotation: Quat) -> WeaponPart {
        WeaponPart {
            name: "Test".into(),
            role: PartRole::Blade,
            shape,
            material: palette::metal(palette::steel_gray()),
            offset,
            rotation,
        }
    }

    #[test]
    fn test_z_range_axis_aligned_cylinder() {
        let p = part(
            PartShape::Cylinder {
                radius: 0.05,
                length: 0.4,
            },
            Vec3::new(0.0, 0.0, 0.3),
            Quat::IDENTITY,
        );
        let (lo, hi) = p.z_range();
        assert!((lo - 0.1).abs() < 1e-6);
        assert!((hi - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_z_range_rotated_cylinder_uses_radius() {
        // Axis rotated onto Y: only the radius contributes to Z
        let p = part(
            PartShape::Cylinder {
                radius: 0.05,
                length: 0.4,
            },
            Vec3::ZERO,
            Quat::from_rotation_x(-FRAC_PI_2),
        );
        let (lo, hi) = p.z_range();
        assert!((lo + 0.05).abs() < 1e-5, "lo was {lo}");
        assert!((hi - 0.05).abs() < 1e-5, "hi was {hi}");
    }

    #[test]
    fn test_top_point_follows_rotation() {
        let p = part(
            PartShape::Cylinder {
                radius: 0.02,
                length: 1.0,
            },
            Vec3::ZERO,
            Quat::from_rotation_x(-FRAC_PI_2),
        );
        let top = p.top_point();
        assert!((top.y - 0.5).abs() < 1e-6, "axis should map onto +Y");
        assert!(top.z.abs() < 1e-6);
    }

    #[test]
    fn test_group_transform_composes() {
        let child = part(
            PartShape::Block {
                extents: Vec3::splat(0.1),
            },
            Vec3::new(0.2, 0.0, 0.0),
            Quat::IDENTITY,
        );
        let asset = WeaponAsset {
            name: "Test".into(),
            category: WeaponCategory::Axe,
            scale: 1.0,
            nodes: vec![PartNode::Group {
                name: "G".into(),
                offset: Vec3::new(0.0, 0.0, 0.5),
                rotation: Quat::from_rotation_z(FRAC_PI_2),
                children: vec![PartNode::Solid(child)],
            }],
        };
        let flat = asset.solids();
        assert_eq!(flat.len(), 1);
        // X offset rotated onto +Y, group Z offset added
        assert!(flat[0].offset.x.abs() < 1e-6);
        assert!((flat[0].offset.y - 0.2).abs() < 1e-6);
        assert!((flat[0].offset.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_scale_by_multiplies_offsets_and_dimensions() {
        let mut asset = WeaponAsset {
            name: "Test".into(),
            category: WeaponCategory::Spear,
            scale: 1.0,
            nodes: vec![PartNode::Solid(part(
                PartShape::Cone {
                    radius: 0.05,
                    length: 0.3,
                },
                Vec3::new(0.0, 0.0, 1.0),
                Quat::IDENTITY,
            ))],
        };
        asset.scale_by(2.0);
        assert_eq!(asset.scale, 2.0);
        let flat = asset.solids();
        assert_eq!(flat[0].offset.z, 2.0);
        match flat[0].shape {
            PartShape::Cone { radius, length } => {
                assert_eq!(radius, 0.1);
                assert_eq!(length, 0.6);
            }
            ref other => panic!("shape changed kind: {other:?}"),
        }
    }

    #[test]
    fn test_role_sides() {
        assert_eq!(PartRole::Grip.side(), GripSide::Handle);
        assert_eq!(PartRole::Pommel.side(), GripSide::Handle);
        assert_eq!(PartRole::Blade.side(), GripSide::Striking);
        assert_eq!(PartRole::Collar.side(), GripSide::Striking);
        assert_eq!(PartRole::BowString.side(), GripSide::Striking);
    }
}
