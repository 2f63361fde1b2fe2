//! Airsense: Air quality and asthma risk assistant
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use airsense::adapters::sanitize::SanitizingMakeWriter;
use airsense::config::{Config, LogMode};
use airsense::tui::App;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logging to the terminal would corrupt the TUI's alternate screen, so an
    // interactive session logs to a file unless told otherwise.
    let use_file = match config.log_mode {
        LogMode::File => true,
        LogMode::Stdout => false,
        LogMode::Auto => std::io::stdout().is_terminal(),
    };

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Best-effort: a missing directory surfaces as an open error below.
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
            tracing_subscriber::fmt::layer()
                .with_writer(SanitizingMakeWriter::with_limit(writer, config.sanitize_max_bytes)),
        )
        .init();

    tracing::info!(db = %config.db_path.display(), page = ?config.start_page, "Starting Airsense...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Airsense shutdown complete.");
    Ok(())
}
