//! Logging utilities and structured logging support
//!
//! The library only emits records through the `log` facade. Binaries pick
//! the backend by calling one of the initializers below once at startup.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter string
///
/// The filter uses the usual `env_logger` syntax, e.g. `"info"` or
/// `"race_physics=debug,track_probe=info"`. A `RUST_LOG` variable, when set,
/// takes precedence so a run can be made more verbose without editing config.
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    // A second initialization (tests, embedding) is not an error worth surfacing
    let _ = builder.try_init();
}
