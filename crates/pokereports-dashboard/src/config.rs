use std::path::{Path, PathBuf};

use pokereports_core::SortDirection;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides `api_url` from the file.
pub const API_URL_ENV: &str = "POKEREPORTS_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_url: String,
    /// Replaces the built-in Pokémon type list when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub sort: SortDirection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_url: DEFAULT_API_URL.to_string(),
            categories: Vec::new(),
            sort: SortDirection::default(),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("pokereports"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config from the default location, or defaults if there is none.
pub fn load_config() -> eyre::Result<DashboardConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<DashboardConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse config JSON, running migrations before deserializing.
pub fn parse_config(contents: &str) -> eyre::Result<DashboardConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: DashboardConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update pokereports."
        ));
    }

    // v0 → v1: the web dashboard's settings used `URL` for the API root.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(url) = obj.remove("URL") {
            obj.entry("api_url").or_insert(url);
        }
        obj.entry("api_url")
            .or_insert(serde_json::Value::String(DEFAULT_API_URL.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (URL → api_url)");
    }

    Ok(json)
}

pub fn save_config(config: &DashboardConfig) -> eyre::Result<PathBuf> {
    let dir = config_dir()?;
    save_config_in(&dir, config)
}

/// Write `config.json` into `dir`, replacing any existing file atomically.
pub fn save_config_in(dir: &Path, config: &DashboardConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

/// The API root to use: `--api-url` / env first, then the file.
pub fn resolve_api_url(cli_or_env: Option<&str>, config: &DashboardConfig) -> String {
    cli_or_env
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(config.api_url.as_str())
        .trim_end_matches('/')
        .to_string()
}
