use log::LevelFilter;

/// Initialize logging for the developer binaries.
///
/// Uses `Debug` level if `debug_enabled` is true, otherwise `Info`.
/// An explicitly set `RUST_LOG` overrides both.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // try_init: a second call (e.g. from a test harness) keeps the first logger
    if builder.try_init().is_ok() {
        log::info!("Logger initialized at {level:?} level");
    }
}
