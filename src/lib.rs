//! Armory - Procedural Weapon Forge Core
//!
//! This crate provides deterministic weapon generation for the dungeon game:
//! - Weapon catalog (stats table, category/name lookups)
//! - Material palette (metal/wood/leather surface presets)
//! - Part model (primitive solids composed into a grip-centered tree)
//! - Forge (one recipe per category behind a dispatch table)
//! - Attachment (re-parenting a forged weapon into a humanoid rig)
//! - Spawn layer (realizing part trees as Bevy entity hierarchies)
//!
//! Every generated weapon follows the same local convention: the grip sits
//! at the origin, the handle extends toward -Z and the striking part toward
//! +Z, so a weapon parented to a hand joint with an identity transform is
//! already "ready to swing".

pub mod attach;
pub mod catalog;
pub mod constants;
pub mod forge;
pub mod logging;
pub mod palette;
pub mod parts;
pub mod spawn;
