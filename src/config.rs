use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "workout-planner.json";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the exported PDF is written to.
    pub output_dir: PathBuf,
    /// Image drawn in the PDF header band, if any.
    pub logo_path: Option<PathBuf>,
    pub catalog_path: PathBuf,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            output_dir: PathBuf::from("."),
            logo_path: None,
            catalog_path: PathBuf::from("assets/catalog.json"),
            window_size: [1280.0, 900.0],
        }
    }
}

impl AppConfig {
    /// Reads the config file, using defaults when it is absent or unusable.
    pub fn load(path: &Path) -> AppConfig {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return AppConfig::default();
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to read config: {}", e);
                return AppConfig::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "config parsing error: {}", e);
                AppConfig::default()
            }
        }
    }
}
