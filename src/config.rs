use crate::protocol::DeviceConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTROL_PATH: &str = "/dev/uinput";
pub const CONTROL_PATH_ENV: &str = "VUINPUT_PATH";

/// The uinput control file, `$VUINPUT_PATH` if set and non-empty.
pub fn control_path() -> PathBuf {
    match std::env::var_os(CONTROL_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONTROL_PATH),
    }
}

pub fn parse_device_config(json: &str) -> Result<DeviceConfig> {
    serde_json::from_str(json).context("Invalid device configuration")
}

/// Reads a JSON [`DeviceConfig`] from disk.
pub fn load_device_config(path: impl AsRef<Path>) -> Result<DeviceConfig> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read device config {}", path.display()))?;
    parse_device_config(&json).with_context(|| format!("In {}", path.display()))
}

pub fn save_device_config(path: impl AsRef<Path>, config: &DeviceConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write device config {}", path.display()))
}
