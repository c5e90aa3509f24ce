use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs an `env_logger` backend once per process.
///
/// Defaults to `Info`; `RUST_LOG` overrides the filter, e.g.
/// `RUST_LOG=avl_hash::tree=trace` shows every rotation.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("avl_hash", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed by the caller.
        let _ = builder.try_init();
    });
}
