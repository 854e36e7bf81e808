mod cli;
mod config;
mod logging;
mod project_path;

use anyhow::Context as _;

use crate::config::BuildConfig;

fn main() -> anyhow::Result<()> {
    logging::init();
    let config = BuildConfig::obtain()?;

    let config = serde_json::to_string(&config).context("failed to serialize build configuration")?;
    println!("{config}");
    Ok(())
}
