use anyhow::{Context, Result};
use lambda_translator::TranslatorConfig;
use std::fs;
use std::path::Path;

/// Reads a translator config; `.toml` files and bodies not opening with `{`
/// are TOML, everything else JSON. Missing keys keep their defaults.
pub(crate) fn load_config(path: &Path) -> Result<TranslatorConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let is_toml = path.extension().is_some_and(|ext| ext == "toml")
        || !raw.trim_start().starts_with('{');
    let config: TranslatorConfig = if is_toml {
        toml::from_str(&raw).with_context(|| format!("Invalid TOML config {}", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON config {}", path.display()))?
    };
    log::debug!("Loaded translator config from {}", path.display());
    Ok(config)
}
