// src/main.rs
use anyhow::{Context, Result};

use spectral_lab::{app::App, config::AppConfig, logging, ui};

fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let _guard = logging::init(&config.log)?;

    let app = App::new(config)?;
    let result = ui::run(app);
    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "spectral-lab exited with an error");
    }
    result
}
