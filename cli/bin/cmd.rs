// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Execution of the subcommands

use std::io::{Read, Write};

use miette::{Context, IntoDiagnostic, Result};
use nbdb::addrset::command::plan_sync;
use nbdb::addrset::listing::parse_listing;
use nbdb::gateway::gateway_router_name;
use nbdb::{AddressSetRef, Identity, hash_for_ovn};
use tracing::debug;

use crate::cmdline::{Command, OutputFormat};

const NBCTL: &str = "ovn-nbctl";

fn write_ref(out: &mut impl Write, format: OutputFormat, reference: &AddressSetRef) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer(&mut *out, reference).into_diagnostic()?,
        OutputFormat::Text => {
            write!(
                out,
                "{}\t{}",
                reference.hashed_name(),
                reference.display_name()
            )
            .into_diagnostic()?;
            let identity = reference.identity();
            match identity {
                Identity::Unparseable => write!(out, "\tunparseable").into_diagnostic()?,
                _ => write!(
                    out,
                    "\t{}\t{}\t{}\t{}\t{}",
                    identity.owner_type().unwrap_or_default(),
                    identity.family().unwrap_or_default(),
                    identity.namespace().unwrap_or_default(),
                    identity.name().unwrap_or_default(),
                    identity.args().unwrap_or_default().join(","),
                )
                .into_diagnostic()?,
            }
        }
    }
    writeln!(out).into_diagnostic()
}

fn write_args(out: &mut impl Write, format: OutputFormat, args: &[String]) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer(&mut *out, args).into_diagnostic()?,
        OutputFormat::Text => write!(out, "{NBCTL} {}", args.join(" ")).into_diagnostic()?,
    }
    writeln!(out).into_diagnostic()
}

/// Run `command`, writing its result to `out`.
///
/// `input` is read by the `list` subcommand when no file is given.
pub fn run(
    command: Command,
    format: OutputFormat,
    input: impl Read,
    out: &mut impl Write,
) -> Result<()> {
    debug!("Running {command:?}");
    match command {
        Command::Encode(owner) => write_ref(out, format, &AddressSetRef::new(owner.into())),
        Command::Decode { display_name } => {
            write_ref(out, format, &AddressSetRef::parse(&display_name))
        }
        Command::Hash { display_name } => {
            writeln!(out, "{}", hash_for_ovn(&display_name)).into_diagnostic()
        }
        Command::List { file } => {
            let listing = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("failed to read listing {}", path.display()))?,
                None => {
                    let mut listing = String::new();
                    let mut input = input;
                    input
                        .read_to_string(&mut listing)
                        .into_diagnostic()
                        .wrap_err("failed to read listing from stdin")?;
                    listing
                }
            };
            for reference in parse_listing(&listing) {
                write_ref(out, format, &reference)?;
            }
            Ok(())
        }
        Command::Sync {
            owner,
            exists,
            addresses,
        } => {
            let reference = AddressSetRef::new(owner.into());
            let args = plan_sync(exists, addresses)
                .args(&reference)
                .into_diagnostic()?;
            write_args(out, format, &args)
        }
        Command::GatewayRouter { node } => {
            writeln!(out, "{}", gateway_router_name(&node)).into_diagnostic()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::run;
    use crate::cmdline::{Command, OutputFormat, OwnerArgs};
    use nbdb::hash_for_ovn;
    use pretty_assertions::assert_eq;

    fn run_to_string(command: Command, format: OutputFormat, input: &str) -> String {
        let mut out = Vec::new();
        run(command, format, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn owner(namespace: &str, name: &str, args: &[&str]) -> OwnerArgs {
        OwnerArgs {
            owner_type: "NetworkPolicy".to_string(),
            ipv6: false,
            namespace: namespace.to_string(),
            name: name.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    #[test]
    fn encode_text() {
        let out = run_to_string(
            Command::Encode(owner("testing", "policy", &["ingress", "1"])),
            OutputFormat::Text,
            "",
        );
        assert_eq!(
            out,
            format!(
                "{}\ttesting.policy.ingress.1\tNetworkPolicy\tv4\ttesting\tpolicy\tingress,1\n",
                hash_for_ovn("testing.policy.ingress.1")
            )
        );
    }

    #[test]
    fn decode_json() {
        let out = run_to_string(
            Command::Decode {
                display_name: "testing".to_string(),
            },
            OutputFormat::Json,
            "",
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["display_name"], "testing");
        assert_eq!(value["hashed_name"], hash_for_ovn("testing"));
        assert_eq!(value["layout"], "bare-namespace");
        assert_eq!(value["namespace"], "testing");
    }

    #[test]
    fn decode_unparseable() {
        let out = run_to_string(
            Command::Decode {
                display_name: ".x".to_string(),
            },
            OutputFormat::Text,
            "",
        );
        assert_eq!(out, format!("{}\t.x\tunparseable\n", hash_for_ovn(".x")));
    }

    #[test]
    fn list_from_input() {
        let out = run_to_string(
            Command::List { file: None },
            OutputFormat::Text,
            "name=testing\nname=\n",
        );
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("\ttesting\tNamespace\tv4\ttesting\t\t\n"));
    }

    #[test]
    fn sync_plan() {
        let out = run_to_string(
            Command::Sync {
                owner: owner("testing", "policy", &["egress", "0"]),
                exists: true,
                addresses: vec![],
            },
            OutputFormat::Text,
            "",
        );
        assert_eq!(
            out,
            format!(
                "ovn-nbctl clear address_set {} addresses\n",
                hash_for_ovn("testing.policy.egress.0")
            )
        );
    }

    #[test]
    fn gateway_router() {
        let out = run_to_string(
            Command::GatewayRouter {
                node: "node1".to_string(),
            },
            OutputFormat::Text,
            "",
        );
        assert_eq!(out, "GR_node1\n");
    }
}
