//! Entry point for the sensortop TUI. Resolves configuration and runs the App.

use std::{env, sync::Arc};

use sensortop::app::App;
use sensortop::config::{parse_args, MonitorConfig};
use sensortop::http::HttpSource;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let config = match MonitorConfig::from_env_and_args(&parsed) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    if parsed.dry_run {
        println!("base_url = {}", config.base_url);
        println!("sensor_id = {}", config.sensor_id);
        println!("limit = {}", config.limit);
        println!("poll_interval_secs = {}", config.poll_interval.as_secs());
        return Ok(());
    }

    // stderr shares the terminal with the UI, so logging is off unless asked for
    let filter = EnvFilter::try_from_env("SENSORTOP_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let source = HttpSource::new(&config)?;
    let mut app = App::new(&config, Arc::new(source));
    app.run().await
}
