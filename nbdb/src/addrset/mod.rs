// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Address set references.
//!
//! An address set is named after the object that owns it.  The owner is described by an
//! [`Owner`] tuple, which [`AddressSetRef`] turns into a human readable display name and a
//! hashed handle (see [`crate::digest`]).  Display names written by older releases used
//! shorter layouts; those layouts are still produced for the owners that used them, and
//! still recognized when parsing.

mod family;
mod owner;
mod reference;

pub mod command;
pub mod listing;

pub use family::IpFamily;
pub use owner::{LegacyLayout, Owner, legacy_layout};
pub use reference::{AddressSetRef, Identity, encode};
