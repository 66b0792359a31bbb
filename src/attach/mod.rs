//! Attachment resolver: parenting a forged weapon into a humanoid rig.
//!
//! The primary path parents the weapon root directly under the rig's
//! "Hand" joint with an identity transform; the grip-centered convention
//! makes any per-weapon correction unnecessary. Rigs without a hand joint
//! degrade to an approximate forearm offset. Only a missing right arm is a
//! reportable error; it performs no mutation.

use bevy::prelude::*;

use crate::constants::{FALLBACK_GRIP_OFFSET, HAND_JOINT, RIGHT_ARM_JOINT};

/// Attachment failure modes
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AttachError {
    #[error("attachment scale must be positive and finite, got {0}")]
    InvalidScale(f32),
    #[error("rig has no right-arm segment")]
    MissingRightArm,
    #[error("weapon entity no longer exists")]
    MissingWeapon,
}

/// Read-only reference into an external skeleton: the rig root and its
/// right-arm segment, if one was found. The optional palm child is
/// discovered at attach time.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonHandRef {
    pub rig: Entity,
    pub right_arm: Option<Entity>,
}

impl SkeletonHandRef {
    /// Walk the rig's descendants for the right-arm segment by name
    pub fn resolve(world: &World, rig: Entity) -> Self {
        Self {
            rig,
            right_arm: find_named_descendant(world, rig, RIGHT_ARM_JOINT),
        }
    }
}

/// The rig's single weapon slot. Attaching a new weapon replaces the
/// reference; the previous weapon entity is left alive for the caller to
/// dispose of.
#[derive(Component, Debug, Clone, Copy)]
pub struct CurrentWeapon {
    pub weapon: Entity,
}

/// Re-parent `weapon` into the rig's hand-joint subtree.
///
/// With a "Hand" joint present the weapon gets a zero local offset and
/// identity rotation both on first attach and on every re-attach. Without
/// one it hangs off the forearm at [`FALLBACK_GRIP_OFFSET`] times `scale`,
/// a visual approximation that is logged but is not an error.
pub fn attach_to_humanoid(
    world: &mut World,
    weapon: Entity,
    hand_ref: &SkeletonHandRef,
    scale: f32,
) -> Result<(), AttachError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(AttachError::InvalidScale(scale));
    }
    if !world.entities().contains(weapon) {
        return Err(AttachError::MissingWeapon);
    }
    let arm = hand_ref
        .right_arm
        .filter(|&arm| world.entities().contains(arm))
        .ok_or(AttachError::MissingRightArm)?;

    let hand = world.get::<Children>(arm).and_then(|children| {
        children
            .iter()
            .copied()
            .find(|&child| {
                world
                    .get::<Name>(child)
                    .is_some_and(|name| name.as_str() == HAND_JOINT)
            })
    });

    match hand {
        Some(hand) => {
            world
                .entity_mut(weapon)
                .set_parent(hand)
                .insert(Transform::IDENTITY);
            info!("attached weapon {weapon:?} under hand joint");
        }
        None => {
            world
                .entity_mut(weapon)
                .set_parent(arm)
                .insert(Transform::from_translation(FALLBACK_GRIP_OFFSET * scale));
            warn!("rig {:?} has no hand joint, using forearm offset", hand_ref.rig);
        }
    }

    world.entity_mut(hand_ref.rig).insert(CurrentWeapon { weapon });
    Ok(())
}

/// Clear the rig's weapon slot and un-parent the weapon, returning it for
/// the caller to despawn or stow. `None` if nothing was equipped.
pub fn detach_weapon(world: &mut World, rig: Entity) -> Option<Entity> {
    let current = world.get::<CurrentWeapon>(rig)?.weapon;
    world.entity_mut(rig).remove::<CurrentWeapon>();
    if world.entities().contains(current) {
        world.entity_mut(current).remove_parent();
    }
    Some(current)
}

fn find_named_descendant(world: &World, root: Entity, target: &str) -> Option<Entity> {
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        let Some(children) = world.get::<Children>(entity) else {
            continue;
        };
        for &child in children.iter() {
            if world
                .get::<Name>(child)
                .is_some_and(|name| name.as_str() == target)
            {
                return Some(child);
            }
            stack.push(child);
        }
    }
    None
}
