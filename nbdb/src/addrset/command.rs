// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! `ovn-nbctl` arguments for address set maintenance.
//!
//! This module only builds argument vectors.  Running them is up to the caller.

use std::net::IpAddr;

use thiserror::Error;
use tracing::debug;

use crate::addrset::AddressSetRef;

const TABLE: &str = "address_set";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Refusing to create address set with unparseable display name {0:?}")]
    Unparseable(String),
}

/// An operation on the address set named by an [`AddressSetRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSetCommand {
    /// Look up the row uuid of the address set.
    Find,
    /// Create the address set, optionally with an initial set of addresses.
    Create { addresses: Vec<IpAddr> },
    /// Replace the addresses of an existing address set.
    Set { addresses: Vec<IpAddr> },
    /// Remove every address from an existing address set.
    Clear,
    Add { address: IpAddr },
    Remove { address: IpAddr },
    /// Destroy the address set if it exists.
    Destroy,
}

impl AddressSetCommand {
    /// Build the `ovn-nbctl` arguments of this command for `reference`.
    ///
    /// # Errors
    ///
    /// [`AddressSetCommand::Create`] records the display name in `external_ids`, and fails
    /// with [`CommandError::Unparseable`] if that name could not be read back later.
    pub fn args(&self, reference: &AddressSetRef) -> Result<Vec<String>, CommandError> {
        let hashed = reference.hashed_name();
        let args: Vec<String> = match self {
            AddressSetCommand::Find => vec![
                "--data=bare".to_string(),
                "--no-heading".to_string(),
                "--columns=_uuid".to_string(),
                "find".to_string(),
                TABLE.to_string(),
                format!("name={hashed}"),
            ],
            AddressSetCommand::Create { addresses } => {
                if reference.is_unparseable() {
                    return Err(CommandError::Unparseable(
                        reference.display_name().to_string(),
                    ));
                }
                let mut args = vec![
                    "create".to_string(),
                    TABLE.to_string(),
                    format!("name={hashed}"),
                    format!("external-ids:name={}", reference.display_name()),
                ];
                if !addresses.is_empty() {
                    args.push(format!("addresses={}", quoted_list(addresses)));
                }
                args
            }
            AddressSetCommand::Set { addresses } => vec![
                "set".to_string(),
                TABLE.to_string(),
                hashed.to_string(),
                format!("addresses={}", quoted_list(addresses)),
            ],
            AddressSetCommand::Clear => vec![
                "clear".to_string(),
                TABLE.to_string(),
                hashed.to_string(),
                "addresses".to_string(),
            ],
            AddressSetCommand::Add { address } => vec![
                "add".to_string(),
                TABLE.to_string(),
                hashed.to_string(),
                "addresses".to_string(),
                format!("\"{address}\""),
            ],
            AddressSetCommand::Remove { address } => vec![
                "remove".to_string(),
                TABLE.to_string(),
                hashed.to_string(),
                "addresses".to_string(),
                format!("\"{address}\""),
            ],
            AddressSetCommand::Destroy => vec![
                "--if-exists".to_string(),
                "destroy".to_string(),
                TABLE.to_string(),
                hashed.to_string(),
            ],
        };
        debug!("{self:?} on address set {reference}: {args:?}");
        Ok(args)
    }
}

/// Decide how to bring the address set to exactly `addresses`.
///
/// `exists` is whether [`AddressSetCommand::Find`] returned a row.
#[must_use]
pub fn plan_sync(exists: bool, addresses: Vec<IpAddr>) -> AddressSetCommand {
    match (exists, addresses.is_empty()) {
        (true, true) => AddressSetCommand::Clear,
        (true, false) => AddressSetCommand::Set { addresses },
        (false, _) => AddressSetCommand::Create { addresses },
    }
}

/// `"a" "b" "c"`, or `[]` for an empty list.
fn quoted_list(addresses: &[IpAddr]) -> String {
    if addresses.is_empty() {
        return "[]".to_string();
    }
    addresses
        .iter()
        .map(|address| format!("\"{address}\""))
        .collect::<Vec<_>>()
        .join(" ")
}
