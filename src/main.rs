//! rfab - Hold-or-Tap Floating Action Control
//!
//! Terminal demo host for the gesture-arbitrated floating action button.

use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

use rfab::config::AppConfig;
use rfab::render::ColorTheme;
use rfab::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("rfab")
        .version(rfab::VERSION)
        .about("A hold-or-tap floating action button, demoed in the terminal")
        .long_about(
            "rfab embeds a gesture-arbitrated floating action button in a \
             two-tab terminal layout. Tap it to expand, hold and drag left or \
             right to commit to a destination. Requires a terminal with mouse \
             reporting.",
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML file overriding gesture thresholds and animation timings"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default | monochrome"),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.exists() {
                anyhow::bail!("Config file does not exist: {}", path.display());
            }
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    let theme = match matches.get_one::<String>("theme").map(String::as_str) {
        None | Some("default") => ColorTheme::default(),
        Some("monochrome") => ColorTheme::monochrome(),
        Some(other) => anyhow::bail!("Unknown theme: {other} (expected default | monochrome)"),
    };

    let mut app = Application::new(&config, theme);
    app.run().await?;

    Ok(())
}
