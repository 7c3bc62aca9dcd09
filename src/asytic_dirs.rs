//! Application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution. Both paths
//! can be overridden via environment variables for testing or custom
//! deployments: `ASYTIC_CONFIG_DIR` and `ASYTIC_DATA_DIR`.

use std::path::PathBuf;

/// Config directory, `dirs::config_dir()/asytic/` by default.
///
/// Holds `config.toml`. Override with `ASYTIC_CONFIG_DIR`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("ASYTIC_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("asytic"))
        .unwrap_or_else(|| PathBuf::from("/tmp/asytic-config"))
}

/// Data directory, `dirs::data_dir()/asytic/` by default.
///
/// Default location for CSV exports. Override with `ASYTIC_DATA_DIR`.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("ASYTIC_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("asytic"))
        .unwrap_or_else(|| PathBuf::from("/tmp/asytic-data"))
}
