//! Config command - merge a configuration file over the defaults and print the result

use anyhow::{Context, Result};
use backspace_core::EffectConfig;

pub fn run(path: Option<&str>) -> Result<()> {
    let config = match path {
        Some(path) => EffectConfig::load(path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => EffectConfig::default(),
    };
    let text = config
        .to_toml_string()
        .context("Failed to serialize config")?;
    print!("{text}");
    Ok(())
}
