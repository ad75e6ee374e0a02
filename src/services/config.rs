use crate::domain::models::Config;
use crate::error::ReportError;
use std::path::{Path, PathBuf};

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/govroles/config.toml"))
}

/// Explicit paths must exist; the default path is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(
                    ReportError::Input(format!("config file not found: {}", p.display())).into(),
                );
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)?;
    parse_config(&raw)
        .map_err(|e| ReportError::Input(format!("invalid config {}: {}", path.display(), e)).into())
}

pub fn parse_config(raw: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(raw)
}
