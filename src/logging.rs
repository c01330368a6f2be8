//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. `ALLVIEW_LOG` takes the usual
//! `EnvFilter` directives and overrides the verbosity flags.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "ALLVIEW_LOG";

/// Default filter for a verbosity count (`-v` repetitions)
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "trace");
    }

    #[test]
    fn test_init_installs_global_subscriber_once() {
        init_logging(0);
        assert!(tracing::dispatcher::has_been_set());

        // a second call keeps the first subscriber instead of panicking
        init_logging(1);
        assert!(tracing::dispatcher::has_been_set());
    }
}
