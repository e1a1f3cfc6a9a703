// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Crate to set up tracing for the ovnk binaries

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

// re-exports
pub use tracing_subscriber::filter::LevelFilter;

/// Level used for every target not named by a directive.
pub const DEFAULT_LOGLEVEL: LevelFilter = LevelFilter::INFO;

/// Environment variable holding the default tracing directives.
pub const LOG_ENV: &str = "OVNK_LOG";

#[derive(Debug, Error)]
pub enum TraceCtlError {
    #[error("Invalid tracing directives '{0}': {1}")]
    InvalidDirectives(String, ParseError),
    #[error("Tracing was already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Build a filter from `directives` (e.g. `nbdb=debug,warn`).
///
/// Targets not matched by any directive log at [`DEFAULT_LOGLEVEL`].
pub fn build_filter(directives: Option<&str>) -> Result<EnvFilter, TraceCtlError> {
    let builder = EnvFilter::builder().with_default_directive(DEFAULT_LOGLEVEL.into());
    match directives {
        None => Ok(builder.parse_lossy("")),
        Some(directives) => builder
            .parse(directives)
            .map_err(|e| TraceCtlError::InvalidDirectives(directives.to_string(), e)),
    }
}

/// Install the global subscriber: formatted events on stderr, filtered by `directives`.
///
/// This can only succeed once per process.
pub fn init(directives: Option<&str>) -> Result<(), TraceCtlError> {
    let filter = build_filter(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    tracing::debug!("Tracing initialized with {directives:?}");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{TraceCtlError, build_filter, init};

    #[test]
    fn default_filter() {
        assert!(build_filter(None).is_ok());
    }

    #[test]
    fn directives() {
        assert!(build_filter(Some("ovnk_nbdb=debug,warn")).is_ok());
        assert!(matches!(
            build_filter(Some("ovnk_nbdb=notalevel")),
            Err(TraceCtlError::InvalidDirectives(..))
        ));
    }

    #[test]
    fn init_once() {
        assert!(init(Some("debug")).is_ok());
        assert!(matches!(
            init(None),
            Err(TraceCtlError::AlreadyInitialized(_))
        ));
    }
}
