// src/infra/paths.rs — Config and credential locations
//
// All paths respect the SHEETCHAT_HOME environment variable for isolation.
// When unset, everything lives under ~/.sheetchat/.

use std::path::PathBuf;

/// Returns the SHEETCHAT_HOME override, if set.
fn sheetchat_home() -> Option<PathBuf> {
    std::env::var_os("SHEETCHAT_HOME").map(PathBuf::from)
}

/// Configuration directory: $SHEETCHAT_HOME/ or ~/.sheetchat/
pub fn config_dir() -> PathBuf {
    if let Some(home) = sheetchat_home() {
        return home;
    }
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(".sheetchat"),
        // No resolvable home: fall back to the working directory.
        None => PathBuf::from(".sheetchat"),
    }
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Credentials directory
pub fn credentials_dir() -> PathBuf {
    config_dir().join("credentials")
}
