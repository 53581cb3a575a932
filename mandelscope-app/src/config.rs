//! Engine configuration read from a JSON file next to the executable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use mandelscope_core::EngineConfig;

const CONFIG_FILE: &str = "mandelscope.json";

/// Load the configuration, falling back to defaults when the file is
/// missing, unreadable, or invalid. The file is never written.
pub(crate) fn load() -> EngineConfig {
    load_from(&config_path())
}

fn load_from(path: &Path) -> EngineConfig {
    if !path.exists() {
        debug!("No config file at {}", path.display());
        return EngineConfig::default();
    }
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to read config file {}: {e}", path.display());
            return EngineConfig::default();
        }
    };
    match serde_json::from_str::<EngineConfig>(&json) {
        Ok(config) => match config.validate() {
            Ok(()) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                error!("Ignoring config file {}: {e}", path.display());
                EngineConfig::default()
            }
        },
        Err(e) => {
            error!("Failed to parse config file {}: {e}", path.display());
            EngineConfig::default()
        }
    }
}

/// Directory containing the running executable. Falls back to current directory if unavailable.
fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn config_path() -> PathBuf {
    exe_directory().join(CONFIG_FILE)
}
