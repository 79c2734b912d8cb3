use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the console subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks info/debug/trace for
/// this crate.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("game_catalog_cleaner={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
