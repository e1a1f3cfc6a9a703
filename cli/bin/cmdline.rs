// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Cmd line of the naming tool

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nbdb::{IpFamily, Owner};

#[derive(Debug, Parser)]
#[command(
    name = "ovnk-names",
    version,
    about = "Build and parse OVN northbound database object names",
    long_about = None
)]
pub struct Cmdline {
    #[arg(
        long,
        global = true,
        env = tracectl::LOG_ENV,
        value_name = "DIRECTIVES",
        help = "Tracing directives, e.g. 'ovnk_nbdb=debug,warn'"
    )]
    pub log: Option<String>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format"
    )]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The owner of an address set
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct OwnerArgs {
    #[arg(long, default_value = Owner::NAMESPACE, help = "Owner type tag")]
    pub owner_type: String,

    #[arg(long, help = "Address set of the IPv6 family")]
    pub ipv6: bool,

    #[arg(long, help = "Namespace of the owner")]
    pub namespace: String,

    #[arg(long, default_value = "", help = "Name of the owner")]
    pub name: String,

    #[arg(help = "Extra name components (direction, rule index, ...)")]
    pub args: Vec<String>,
}

impl From<OwnerArgs> for Owner {
    fn from(value: OwnerArgs) -> Self {
        Owner::new(
            value.owner_type,
            IpFamily::from(value.ipv6),
            value.namespace,
            value.name,
        )
        .with_args(value.args)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the display name and hashed name of an address set
    Encode(OwnerArgs),
    /// Parse an address set display name
    Decode { display_name: String },
    /// Compute the hashed name of a display name
    Hash { display_name: String },
    /// Decode the output of `ovn-nbctl --data=bare --no-heading --columns=external_ids find address_set`
    List {
        #[arg(help = "File holding the listing (stdin if absent)")]
        file: Option<PathBuf>,
    },
    /// Print the ovn-nbctl arguments bringing an address set to exactly the given addresses
    Sync {
        #[command(flatten)]
        owner: OwnerArgs,

        #[arg(long, help = "The address set already exists")]
        exists: bool,

        #[arg(long = "address", value_name = "IP")]
        addresses: Vec<IpAddr>,
    },
    /// Print the name of the gateway router of a node
    GatewayRouter { node: String },
}
