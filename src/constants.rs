//! Centralized constants for the weapon forge core.
//!
//! Eliminates magic numbers shared between the forge, the attachment
//! resolver and their tests. Per-recipe dimensions (blade lengths, head
//! sizes) remain in `forge::recipes` as the single source of truth.

use bevy::prelude::Vec3;

// =====================================================
// Rig joints
// =====================================================

/// Name of the right-arm segment searched for on a humanoid rig
pub const RIGHT_ARM_JOINT: &str = "RightArm";

/// Name of the optional palm child under the right arm
pub const HAND_JOINT: &str = "Hand";

// =====================================================
// Attachment
// =====================================================

/// Grip offset used when a rig has no dedicated hand joint, at scale 1.0.
///
/// Tuned against the stock humanoid's forearm proportions; a visual
/// approximation only, not validated against other rigs.
pub const FALLBACK_GRIP_OFFSET: Vec3 = Vec3::new(0.0, -0.4, 0.1);

// =====================================================
// Forge
// =====================================================

/// Default uniform scale for forged weapons
pub const DEFAULT_WEAPON_SCALE: f32 = 1.0;

/// Slack allowed when splitting parts across the grip plane, at scale 1.0.
///
/// Round parts whose axis lies in the grip plane (a bow grip, limb bellies)
/// overhang the plane by up to their radius; everything else splits exactly.
pub const GRIP_PLANE_SLACK: f32 = 0.05;
