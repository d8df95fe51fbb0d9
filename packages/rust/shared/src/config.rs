//! Application configuration for the standings generator.
//!
//! Config is read from `standings.toml`: an explicit `--config` path first,
//! then `./standings.toml`, then `~/.standings/standings.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StandingsError};
use crate::types::Division;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "standings.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".standings";

// ---------------------------------------------------------------------------
// Config structs (matching standings.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Page texts and asset links.
    #[serde(default)]
    pub site: SiteConfig,

    /// Per-division overrides.
    #[serde(default)]
    pub divisions: DivisionsConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root holding one report directory per division.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Directory holding team badge images.
    #[serde(default = "default_img_dir")]
    pub img_dir: String,

    /// Directory the HTML pages are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Placeholder badge file name inside `img_dir`.
    #[serde(default = "default_badge")]
    pub default_badge: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            img_dir: default_img_dir(),
            output_dir: default_output_dir(),
            default_badge: default_badge(),
        }
    }
}

fn default_docs_dir() -> String {
    "resources/docs".into()
}
fn default_img_dir() -> String {
    "resources/img".into()
}
fn default_output_dir() -> String {
    "output".into()
}
fn default_badge() -> String {
    "default_badge.png".into()
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Heading shown above every table.
    #[serde(default = "default_league_title")]
    pub league_title: String,

    /// Browser `<title>`.
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Stylesheet href, relative to the output page.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// Script src, relative to the output page.
    #[serde(default = "default_script")]
    pub script: String,

    /// Badge image width in pixels.
    #[serde(default = "default_badge_width")]
    pub badge_width: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            league_title: default_league_title(),
            page_title: default_page_title(),
            stylesheet: default_stylesheet(),
            script: default_script(),
            badge_width: default_badge_width(),
        }
    }
}

fn default_league_title() -> String {
    "Liga Regional de Frontenis Castilla y León".into()
}
fn default_page_title() -> String {
    "Clasificación Liga Frontenis Castilla y León".into()
}
fn default_stylesheet() -> String {
    "static/style.css".into()
}
fn default_script() -> String {
    "static/script.js".into()
}
fn default_badge_width() -> u32 {
    30
}

/// `[divisions]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionsConfig {
    #[serde(default = "default_honor")]
    pub honor: DivisionConfig,

    #[serde(default = "default_primera")]
    pub primera: DivisionConfig,
}

impl Default for DivisionsConfig {
    fn default() -> Self {
        Self {
            honor: default_honor(),
            primera: default_primera(),
        }
    }
}

fn default_honor() -> DivisionConfig {
    DivisionConfig::for_division(Division::Honor)
}
fn default_primera() -> DivisionConfig {
    DivisionConfig::for_division(Division::Primera)
}

impl DivisionsConfig {
    /// Settings for one division.
    pub fn get(&self, division: Division) -> &DivisionConfig {
        match division {
            Division::Honor => &self.honor,
            Division::Primera => &self.primera,
        }
    }
}

/// `[divisions.<slug>]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionConfig {
    /// Bottom positions highlighted as relegation places.
    pub relegation_slots: usize,

    /// Header name override (defaults to the division's own name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl DivisionConfig {
    fn for_division(division: Division) -> Self {
        Self {
            relegation_slots: division.default_relegation_slots(),
            display_name: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.standings/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StandingsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file (`~/.standings/standings.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Find the config file to use, if any.
///
/// An explicit path must exist. Otherwise `./standings.toml` wins over the
/// user config file; `None` means defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(StandingsError::config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }

    // A missing home directory only means there is no user config.
    match config_file_path() {
        Ok(path) if path.exists() => Ok(Some(path)),
        _ => Ok(None),
    }
}

/// Load the application config. Returns defaults if no config file is found.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match resolve_config(explicit)? {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StandingsError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        StandingsError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| StandingsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| StandingsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| StandingsError::io(&path, e))?;
    tracing::info!(path = %path.display(), "created default config file");

    Ok(path)
}
