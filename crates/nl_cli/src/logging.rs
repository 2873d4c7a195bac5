use std::sync::Once;

use tracing::Level;

static INIT: Once = Once::new();

/// Installs the fmt subscriber once. Logs go to stderr so that stdout carries
/// only the rendered newsletter.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let level = if verbose { Level::DEBUG } else { Level::INFO };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    });
}
