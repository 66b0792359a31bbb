//! Spawn layer: realizing part trees as Bevy entity hierarchies.
//!
//! Round solids (cylinders, cones, tapers) mesh through Bevy's primitives
//! with a quarter-turn fix-up, since the part model's long axis is +Z and
//! Bevy meshes extrude along +Y. Wedges have no Bevy primitive and get a
//! hand-built triangle list.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

use crate::attach::{attach_to_humanoid, SkeletonHandRef};
use crate::catalog::WeaponCategory;
use crate::forge::create_weapon;
use crate::palette::MaterialSpec;
use crate::parts::{PartNode, PartShape, WeaponAsset};

pub struct WeaponForgePlugin;

impl Plugin for WeaponForgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ForgeWeaponRequest>()
            .add_systems(Update, process_forge_requests);
    }
}

/// Marker on every spawned weapon root
#[derive(Component, Debug)]
pub struct WeaponRoot {
    pub category: WeaponCategory,
}

/// Forge-and-equip request; with `wielder` set the weapon is attached to
/// that rig in the same frame it is forged.
#[derive(Event, Debug, Clone)]
pub struct ForgeWeaponRequest {
    pub category: WeaponCategory,
    pub scale: f32,
    pub wielder: Option<Entity>,
    pub blade_material: Option<MaterialSpec>,
    pub handle_material: Option<MaterialSpec>,
}

impl ForgeWeaponRequest {
    pub fn new(category: WeaponCategory) -> Self {
        Self {
            category,
            scale: crate::constants::DEFAULT_WEAPON_SCALE,
            wielder: None,
            blade_material: None,
            handle_material: None,
        }
    }

    pub fn for_wielder(category: WeaponCategory, wielder: Entity) -> Self {
        Self {
            wielder: Some(wielder),
            ..Self::new(category)
        }
    }
}

/// Realize a built asset as an entity hierarchy; returns the root.
///
/// The root carries the asset's canonical name and [`WeaponRoot`]; parts
/// become `Name`d mesh children with their local transforms.
pub fn spawn_weapon(world: &mut World, asset: &WeaponAsset) -> Entity {
    world.resource_scope(|world, mut meshes: Mut<Assets<Mesh>>| {
        world.resource_scope(|world, mut materials: Mut<Assets<StandardMaterial>>| {
            let root = world
                .spawn((
                    Name::new(asset.name.clone()),
                    WeaponRoot {
                        category: asset.category,
                    },
                    Transform::IDENTITY,
                    Visibility::default(),
                ))
                .id();
            for node in &asset.nodes {
                spawn_node(world, &mut meshes, &mut materials, root, node);
            }
            root
        })
    })
}

fn spawn_node(
    world: &mut World,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    parent: Entity,
    node: &PartNode,
) {
    match node {
        PartNode::Solid(part) => {
            let (mesh, rotation) = realize_shape(meshes, &part.shape, part.rotation);
            let entity = world
                .spawn((
                    Name::new(part.name.clone()),
                    Mesh3d(mesh),
                    MeshMaterial3d(materials.add(part.material.to_standard_material())),
                    Transform {
                        translation: part.offset,
                        rotation,
                        scale: Vec3::ONE,
                    },
                ))
                .id();
            world.entity_mut(entity).set_parent(parent);
        }
        PartNode::Group {
            name,
            offset,
            rotation,
            children,
        } => {
            let group = world
                .spawn((
                    Name::new(name.clone()),
                    Transform {
                        translation: *offset,
                        rotation: *rotation,
                        scale: Vec3::ONE,
                    },
                    Visibility::default(),
                ))
                .id();
            world.entity_mut(group).set_parent(parent);
            for child in children {
                spawn_node(world, meshes, materials, group, child);
            }
        }
    }
}

/// Mesh a shape and fold the Y-up to Z-up axis fix into the part rotation
fn realize_shape(
    meshes: &mut Assets<Mesh>,
    shape: &PartShape,
    rotation: Quat,
) -> (Handle<Mesh>, Quat) {
    let y_to_z = Quat::from_rotation_x(FRAC_PI_2);
    match *shape {
        PartShape::Cylinder { radius, length } => {
            (meshes.add(Cylinder::new(radius, length)), rotation * y_to_z)
        }
        PartShape::Cone { radius, length } => (
            meshes.add(Cone {
                radius,
                height: length,
            }),
            rotation * y_to_z,
        ),
        PartShape::Taper {
            radius_bottom,
            radius_top,
            length,
        } => (
            meshes.add(ConicalFrustum {
                radius_top,
                radius_bottom,
                height: length,
            }),
            rotation * y_to_z,
        ),
        PartShape::Block { extents } => (
            meshes.add(Cuboid::new(extents.x, extents.y, extents.z)),
            rotation,
        ),
        PartShape::Wedge { extents } => (meshes.add(wedge_mesh(extents)), rotation),
    }
}

/// Triangular prism: full X/Y cross-section at -Z collapsing to an
/// X-aligned edge at +Z. Flat-shaded, so faces do not share vertices.
fn wedge_mesh(extents: Vec3) -> Mesh {
    let h = extents / 2.0;
    let slope = Vec3::new(0.0, 2.0 * h.z, h.y).normalize();

    // Base rectangle corners and the top edge endpoints
    let a = [-h.x, -h.y, -h.z];
    let b = [h.x, -h.y, -h.z];
    let c = [h.x, h.y, -h.z];
    let d = [-h.x, h.y, -h.z];
    let e = [-h.x, 0.0, h.z];
    let f = [h.x, 0.0, h.z];

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(18);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(18);
    let mut indices: Vec<u32> = Vec::with_capacity(24);

    let mut face = |verts: &[[f32; 3]], normal: Vec3, tris: &[[u32; 3]]| {
        let base = positions.len() as u32;
        positions.extend_from_slice(verts);
        normals.extend(std::iter::repeat(normal.to_array()).take(verts.len()));
        for tri in tris {
            indices.extend(tri.iter().map(|i| base + i));
        }
    };

    // Base (-Z), the two slopes, and the triangular ends
    face(&[a, b, c, d], Vec3::NEG_Z, &[[0, 3, 2], [0, 2, 1]]);
    face(
        &[d, c, f, e],
        Vec3::new(0.0, slope.y, slope.z),
        &[[0, 2, 1], [0, 3, 2]],
    );
    face(
        &[a, b, f, e],
        Vec3::new(0.0, -slope.y, slope.z),
        &[[0, 1, 2], [0, 2, 3]],
    );
    face(&[b, c, f], Vec3::X, &[[0, 1, 2]]);
    face(&[a, d, e], Vec3::NEG_X, &[[0, 2, 1]]);

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(indices))
}

/// Exclusive system: drain forge requests, build + spawn, attach to the
/// wielder when one is given.
fn process_forge_requests(world: &mut World) {
    let requests: Vec<ForgeWeaponRequest> = world
        .resource_mut::<Events<ForgeWeaponRequest>>()
        .drain()
        .collect();
    for request in requests {
        let asset = match create_weapon(
            request.category,
            request.scale,
            request.blade_material,
            request.handle_material,
        ) {
            Ok(asset) => asset,
            Err(err) => {
                error!("forge request for {:?} rejected: {err}", request.category);
                continue;
            }
        };
        let weapon = spawn_weapon(world, &asset);
        if let Some(rig) = request.wielder {
            let hand_ref = SkeletonHandRef::resolve(world, rig);
            if let Err(err) = attach_to_humanoid(world, weapon, &hand_ref, request.scale) {
                error!("could not equip {:?} on {rig:?}: {err}", request.category);
            }
        }
    }
}
