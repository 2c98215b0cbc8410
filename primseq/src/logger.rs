//! Logging setup for applications using this crate.
//!
//! The collections emit `tracing` events at `trace` and `debug` level (buffer
//! adoption, view compaction, traversal splitting). This module installs a
//! subscriber that prints them, and forwards `log` crate records to tracing.
//!
//! # Example
//!
//! ```ignore
//! use primseq::logger::init_logging;
//!
//! // PRIMSEQ_LOG (or RUST_LOG) overrides the default directive
//! init_logging("primseq=debug,info");
//! tracing::info!("ready");
//! ```

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable read before `RUST_LOG` when building the filter.
pub const LOG_ENV: &str = "PRIMSEQ_LOG";

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Builds the filter from `PRIMSEQ_LOG`, then `RUST_LOG`, then `default_directives`.
///
/// Unparseable directives fall back to `info`.
pub fn filter_from_env(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a compact stderr subscriber and the `log` bridge.
///
/// `default_directives` is an `EnvFilter` directive string such as
/// `"primseq=trace"`, used when neither environment variable is set.
/// Only the first call does anything; every call returns whether that first
/// call managed to install the global subscriber.
pub fn init_logging(default_directives: &str) -> bool {
    *INSTALLED.get_or_init(|| {
        tracing_log::LogTracer::init().ok();

        let fmt_layer = fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr);

        let installed = tracing_subscriber::registry()
            .with(filter_from_env(default_directives))
            .with(fmt_layer)
            .try_init()
            .is_ok();
        tracing::debug!(default_directives, installed, "logging initialized");
        installed
    })
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImmutableList;

    #[test]
    fn test_init_logging_is_idempotent() {
        let first = init_logging("primseq=trace");
        assert_eq!(init_logging("off"), first);
    }

    #[test]
    fn test_filter_falls_back_on_bad_directive() {
        if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
            use tracing_subscriber::filter::LevelFilter;

            let fallback = filter_from_env("primseq=[");
            assert_eq!(fallback.max_level_hint(), Some(LevelFilter::INFO));
            let debug = filter_from_env("primseq=debug");
            assert_eq!(debug.max_level_hint(), Some(LevelFilter::DEBUG));
        }
    }

    #[test]
    fn test_collection_events_under_subscriber() {
        init_logging("primseq=trace");
        let list = ImmutableList::from_vec(vec![1, 2, 3]);
        let view = list.sub_list(0, 2).unwrap();
        let compact = ImmutableList::copy_of_list(&view);
        assert_eq!(compact.to_vec(), vec![1, 2]);
        info!(len = compact.len(), "compacted");
    }

    #[test]
    fn test_log_crate_forwarding() {
        init_logging("info");
        log::info!("log crate info");
        log::warn!("log crate warn");
    }
}
