// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]

mod cmd;
mod cmdline;

use clap::Parser;
use miette::IntoDiagnostic;

use crate::cmdline::Cmdline;

fn main() -> miette::Result<()> {
    let cmdline = Cmdline::parse();
    tracectl::init(cmdline.log.as_deref()).into_diagnostic()?;
    let stdout = std::io::stdout();
    cmd::run(
        cmdline.command,
        cmdline.output,
        std::io::stdin().lock(),
        &mut stdout.lock(),
    )
}
