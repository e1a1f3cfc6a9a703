// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Naming helpers for objects kept in the OVN northbound database.
//!
//! Nothing in this crate talks to OVN.  It builds and parses the names under which
//! address sets and gateway routers are stored, and the argument vectors a caller hands
//! to `ovn-nbctl`.

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod addrset;
#[cfg(any(test, feature = "bolero"))]
pub mod contract;
pub mod digest;
pub mod gateway;

// re-exports
pub use addrset::{AddressSetRef, Identity, IpFamily, Owner};
pub use digest::{NameDigest, OvnNameDigest, hash_for_ovn};
