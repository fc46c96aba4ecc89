//! Configuration for the library profile and output format.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI on top of this module)
//! 2. Environment variables (LMS_LIBRARY_NAME, LMS_LIBRARY_ADDRESS, LMS_PINCODE, LMS_FORMAT)
//! 3. Config file (.lms/config.yaml)
//! 4. Interactive prompt for any profile field still missing
//!
//! Config file discovery:
//! - Searches current directory and parents for .lms/config.yaml
//! - Falls back to ~/.lms/config.yaml

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_LIBRARY_NAME: &str = "LMS_LIBRARY_NAME";
pub const ENV_LIBRARY_ADDRESS: &str = "LMS_LIBRARY_ADDRESS";
pub const ENV_PINCODE: &str = "LMS_PINCODE";
pub const ENV_FORMAT: &str = "LMS_FORMAT";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub library: ProfileConfig,
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

/// Library profile values; anything missing is prompted for
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileConfig {
    pub name: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub format: Option<OutputFormat>,
}

/// How book records are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `Book [Name: ..., Author: ...]` lines
    #[default]
    Text,

    /// One JSON object per line
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Profile values known before the menu starts
    pub profile: ProfileConfig,
    /// Output format for book records
    pub format: OutputFormat,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".lms").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".lms").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file with environment lookups
fn resolve(
    config_file: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let (config_path, file_profile, file_format) = match config_file {
        Some((path, file)) => {
            let format = file.display.and_then(|d| d.format);
            (Some(path), file.library, format)
        }
        None => (None, ProfileConfig::default(), None),
    };

    // A non-numeric pincode is dropped so the menu prompts for it
    let pincode = match env(ENV_PINCODE) {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(pincode) => Some(pincode),
            Err(_) => {
                warn!("Ignoring {}: not a number: {}", ENV_PINCODE, raw);
                file_profile.pincode
            }
        },
        None => file_profile.pincode,
    };

    let format = match env(ENV_FORMAT) {
        Some(raw) => raw.parse()?,
        None => file_format.unwrap_or_default(),
    };

    Ok(ResolvedConfig {
        profile: ProfileConfig {
            name: env(ENV_LIBRARY_NAME).or(file_profile.name),
            address: env(ENV_LIBRARY_ADDRESS).or(file_profile.address),
            pincode,
        },
        format,
        config_file: config_path,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = match find_config_file() {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    resolve(config_file, |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
