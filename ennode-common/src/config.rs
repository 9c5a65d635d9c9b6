//! Site configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the site starts on defaults with a
//! warning. A TOML file that exists but does not parse is.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::locale::Locale;
use crate::works::TitleAliases;
use crate::{Error, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_BASE_API_URL: &str = "https://api.visualennode.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Largest accepted CV upload (whole multipart body)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const ENV_BASE_API_URL: &str = "BASE_API_URL";
pub const ENV_BIND_ADDR: &str = "ENNODE_BIND_ADDR";

/// On-disk TOML configuration, every key optional
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub base_api_url: Option<String>,
    pub default_locale: Option<Locale>,
    pub request_timeout_secs: Option<u64>,
    pub max_upload_bytes: Option<usize>,
    /// Standalone TOML file holding a `[title_aliases]` table
    pub title_aliases_path: Option<PathBuf>,
    #[serde(default)]
    pub title_aliases: HashMap<String, String>,
}

impl TomlConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit TOML file; must exist when given
    pub config_path: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub base_api_url: Option<String>,
}

/// Fully resolved site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub bind_addr: String,
    pub base_api_url: String,
    pub default_locale: Locale,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub title_aliases: TitleAliases,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            base_api_url: DEFAULT_BASE_API_URL.to_string(),
            default_locale: Locale::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            title_aliases: TitleAliases::builtin().clone(),
        }
    }
}

impl SiteConfig {
    /// Resolve configuration from CLI overrides, environment, TOML, defaults
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let toml_config = match &overrides.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                info!("Loading config from {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => match default_config_path() {
                Some(path) => {
                    info!("Loading config from {}", path.display());
                    Some(TomlConfig::from_file(&path)?)
                }
                None => {
                    warn!("No config file found, using defaults");
                    None
                }
            },
        };

        Self::from_sources(overrides, toml_config.unwrap_or_default())
    }

    /// Merge CLI overrides and environment over an already-parsed TOML config
    pub fn from_sources(overrides: &ConfigOverrides, toml_config: TomlConfig) -> Result<Self> {
        let bind_addr = overrides
            .bind_addr
            .clone()
            .or_else(|| non_empty_env(ENV_BIND_ADDR))
            .or(toml_config.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let base_api_url = overrides
            .base_api_url
            .clone()
            .or_else(|| non_empty_env(ENV_BASE_API_URL))
            .or(toml_config.base_api_url)
            .unwrap_or_else(|| DEFAULT_BASE_API_URL.to_string());

        if !base_api_url.starts_with("http://") && !base_api_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Base API URL must be http(s): {}",
                base_api_url
            )));
        }

        let timeout_secs = toml_config
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }

        let max_upload_bytes = toml_config
            .max_upload_bytes
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        if max_upload_bytes == 0 {
            return Err(Error::Config("max_upload_bytes must be positive".to_string()));
        }

        let mut title_aliases = TitleAliases::builtin().clone();
        if let Some(path) = &toml_config.title_aliases_path {
            title_aliases.extend(TitleAliases::from_toml_file(path)?);
        }
        title_aliases.extend(TitleAliases::from_pairs(toml_config.title_aliases));

        Ok(Self {
            bind_addr,
            base_api_url: base_api_url.trim_end_matches('/').to_string(),
            default_locale: toml_config.default_locale.unwrap_or_default(),
            request_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
            title_aliases,
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// First existing config file in the platform search order
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("ennode").join("site.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/ennode/site.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
