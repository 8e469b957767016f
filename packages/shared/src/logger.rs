//! Logging setup for the Huddle binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library, the binary itself and the HTTP
/// tracing layer. `RUST_LOG` overrides it entirely when set.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "huddle-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use huddle_shared::logger::setup_logger;
///
/// setup_logger("huddle-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

const LIBRARY_TARGET: &str = "huddle_server";

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets = vec![LIBRARY_TARGET, "tower_http"];
    if binary_target != LIBRARY_TARGET {
        targets.insert(1, binary_target.as_str());
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}
