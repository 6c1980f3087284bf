//! Cardiocheck: cardiovascular risk prediction client
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiocheck::adapters::sanitize::SanitizingMakeWriter;
use cardiocheck::tui::App;
use cardiocheck::Config;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs on the terminal would corrupt the alternate screen, so an
    // interactive session logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer().with_writer(
                SanitizingMakeWriter::new(writer).with_max_bytes(config.sanitize_max_bytes),
            ),
        )
        .init();

    tracing::info!("Starting Cardiocheck...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Cardiocheck shutdown complete.");
    Ok(())
}
