use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::AreaUnit;
use crate::geometry::GeoPoint;

fn default_unit() -> AreaUnit {
    AreaUnit::Hectares
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Latitude the capture surface opens on when nothing else is known
    #[serde(default)]
    pub center_lat: Option<f64>,
    #[serde(default)]
    pub center_lon: Option<f64>,
    /// Unit areas are printed in
    #[serde(default = "default_unit")]
    pub unit: AreaUnit,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub geocoder: Option<GeocoderConfig>,
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_user_agent() -> String {
    concat!("fieldarea/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FileConfig {
    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Default viewport center, if both coordinates are configured and valid
    pub fn center(&self) -> Option<GeoPoint> {
        match (self.center_lat, self.center_lon) {
            (Some(lat), Some(lon)) => match GeoPoint::try_new(lat, lon) {
                Ok(point) => Some(point),
                Err(e) => {
                    warn!("Ignoring configured center: {}", e);
                    None
                }
            },
            _ => None,
        }
    }
}

/// Config file names looked up in the working directory
const LOCAL_FILES: [&str; 2] = ["fieldarea.toml", ".fieldarea.toml"];

/// Config files looked up under the platform config directory
const CONFIG_DIR_FILES: [&str; 2] = ["fieldarea/config.toml", "fieldarea.toml"];

/// Config files looked up under the home directory
const HOME_FILES: [&str; 2] = [".fieldarea.toml", ".config/fieldarea/config.toml"];

/// Candidate config files in lookup order
fn get_config_paths() -> Vec<PathBuf> {
    let local = LOCAL_FILES.iter().map(PathBuf::from);
    let in_config_dir = dirs::config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_DIR_FILES.iter().map(move |f| dir.join(f)));
    let in_home = dirs::home_dir()
        .into_iter()
        .flat_map(|dir| HOME_FILES.iter().map(move |f| dir.join(f)));

    local.chain(in_config_dir).chain(in_home).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.unit, AreaUnit::Hectares);
        assert!(!config.verbose);
        assert!(config.center().is_none());
        assert!(config.geocoder.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
center_lat = 44.4949
center_lon = 11.3426
unit = "ac"
verbose = true

[geocoder]
url = "http://localhost:8080/search"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.center(), Some(GeoPoint::new(44.4949, 11.3426)));
        assert_eq!(config.unit, AreaUnit::Acres);
        assert!(config.verbose);

        let geocoder = config.geocoder.unwrap();
        assert_eq!(geocoder.url, "http://localhost:8080/search");
        assert_eq!(geocoder.timeout_secs, 5);
        assert!(geocoder.user_agent.starts_with("fieldarea/"));
    }

    #[test]
    fn test_invalid_center_is_ignored() {
        let config: FileConfig = toml::from_str("center_lat = 120.0\ncenter_lon = 0.0").unwrap();
        assert!(config.center().is_none());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unit = \"m2\"").unwrap();

        let config = FileConfig::from_path(file.path()).unwrap();
        assert_eq!(config.unit, AreaUnit::SquareMeters);
    }

    #[test]
    fn test_from_path_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unit = [").unwrap();

        assert!(FileConfig::from_path(file.path()).is_err());
    }

    #[test]
    fn test_config_paths_start_with_working_directory() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("fieldarea.toml"));
        assert_eq!(paths[1], PathBuf::from(".fieldarea.toml"));
        assert!(paths.iter().all(|p| p.to_string_lossy().ends_with(".toml")));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::from_path(&dir.path().join("missing.toml")).is_err());
    }
}
