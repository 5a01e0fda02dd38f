//! Process-wide logging profiles.
//!
//! Exactly one profile is installed per run, before the backend registry is
//! consulted and before any backend executes:
//!
//! - **Normal**: informational threshold, compact timestamped lines, HTTP
//!   transport crates capped at `warn`.
//! - **Debug** (`-g/--debug`): debug threshold, full format with target and
//!   level.
//!
//! A `QUARRY_LOG` environment variable overrides both profiles with standard
//! `EnvFilter` directives. All log output goes to stderr; stdout is reserved
//! for fetched items.

use tracing_subscriber::EnvFilter;

use crate::project_identity;

const NORMAL_DIRECTIVES: &str = "info,reqwest=warn,hyper=warn,hyper_util=warn";
const DEBUG_DIRECTIVES: &str = "debug";

/// Install the global logging profile. Calling this a second time is a
/// no-op; the first profile stays active for the rest of the run.
pub fn configure(debug: bool) {
    let filter = EnvFilter::try_from_env(project_identity::env_key("LOG"))
        .unwrap_or_else(|_| EnvFilter::new(profile_directives(debug)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if debug {
        builder.with_target(true).with_level(true).try_init()
    } else {
        builder
            .compact()
            .with_target(false)
            .with_level(false)
            .try_init()
    };
    // Already-installed means an earlier configure() won; keep its profile.
    let _ = installed;
}

pub(crate) fn profile_directives(debug: bool) -> &'static str {
    if debug {
        DEBUG_DIRECTIVES
    } else {
        NORMAL_DIRECTIVES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_profile_is_informational_and_caps_transport_noise() {
        let directives = profile_directives(false);
        assert!(directives.starts_with("info"));
        assert!(directives.contains("reqwest=warn"));
        assert!(directives.contains("hyper=warn"));
    }

    #[test]
    fn debug_profile_lowers_the_threshold() {
        assert_eq!(profile_directives(true), "debug");
    }

    #[test]
    fn reconfiguring_is_a_noop() {
        configure(false);
        // The second call must not panic or replace the active profile.
        configure(true);
    }
}
