use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::generator::config::remark::MAX_NAME_LENGTH;
use crate::generator::yaml::clash::ClashGeneral;
use crate::utils::http::DEFAULT_TIMEOUT;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported settings format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

fn default_user_agent() -> String {
    "subaggregator".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_max_concurrent() -> usize {
    4
}

fn default_max_name_length() -> usize {
    MAX_NAME_LENGTH
}

fn default_url_test_name() -> String {
    "🚀 AUTO-SELECT".to_string()
}

fn default_select_name() -> String {
    "🌐 PROXY".to_string()
}

fn default_test_url() -> String {
    "http://www.gstatic.com/generate_204".to_string()
}

fn default_interval() -> u32 {
    300
}

fn default_proxies_path() -> String {
    "akun.yaml".to_string()
}

fn default_policy_path() -> String {
    "config.yaml".to_string()
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(
            "free_v2ray",
            "https://raw.githubusercontent.com/ebrasha/free-v2ray-public-list/main/vmess_configs.txt",
        ),
        SourceConfig::new(
            "v2ray_list",
            "https://raw.githubusercontent.com/mianfeifq/share/main/data2024101.txt",
        ),
        SourceConfig::new(
            "free_config",
            "https://raw.githubusercontent.com/freefq/free/master/v2",
        ),
    ]
}

/// One remote subscription list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Short tag prefixed to every proxy name from this source
    pub tag: String,
    pub url: String,
}

impl SourceConfig {
    pub fn new(tag: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            url: url.into(),
        }
    }

    /// Parse a `TAG=URL` pair as given on the command line.
    pub fn parse_pair(pair: &str) -> Result<Self, SettingsError> {
        match pair.split_once('=') {
            Some((tag, url)) if !tag.trim().is_empty() && !url.trim().is_empty() => {
                Ok(Self::new(tag.trim(), url.trim()))
            }
            _ => Err(SettingsError::Invalid(format!(
                "source must be TAG=URL, got {:?}",
                pair
            ))),
        }
    }
}

/// HTTP fetch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_concurrent: default_max_concurrent(),
            user_agent: default_user_agent(),
        }
    }
}

/// Display name settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    #[serde(default = "default_max_name_length")]
    pub max_length: usize,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            max_length: default_max_name_length(),
        }
    }
}

/// Proxy group and rule settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSettings {
    #[serde(default = "default_url_test_name")]
    pub url_test_name: String,
    #[serde(default = "default_select_name")]
    pub select_name: String,
    #[serde(default = "default_test_url")]
    pub test_url: String,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Rules emitted before the final `MATCH` rule
    pub extra_rules: Vec<String>,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            url_test_name: default_url_test_name(),
            select_name: default_select_name(),
            test_url: default_test_url(),
            interval: default_interval(),
            extra_rules: Vec::new(),
        }
    }
}

/// Output file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    #[serde(default = "default_proxies_path")]
    pub proxies_path: String,
    #[serde(default = "default_policy_path")]
    pub policy_path: String,
    /// Combined profile, written only when set
    pub profile_path: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            proxies_path: default_proxies_path(),
            policy_path: default_policy_path(),
            profile_path: None,
        }
    }
}

/// Settings structure for one aggregation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sources in precedence order
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    pub fetch: FetchSettings,
    pub naming: NamingSettings,
    pub groups: GroupSettings,
    pub output: OutputSettings,
    pub general: Option<ClashGeneral>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            fetch: FetchSettings::default(),
            naming: NamingSettings::default(),
            groups: GroupSettings::default(),
            output: OutputSettings::default(),
            general: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse settings from YAML content. Empty content yields defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, SettingsError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load and validate settings from a file, picking the format by extension.
    ///
    /// `None` returns the validated defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match path {
            None => Self::default(),
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                match path.extension().and_then(|ext| ext.to_str()) {
                    Some("toml") => Self::from_toml_str(&content)?,
                    Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
                    other => {
                        return Err(SettingsError::UnsupportedFormat(
                            other.unwrap_or("<none>").to_string(),
                        ))
                    }
                }
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut tags = HashSet::new();
        for source in &self.sources {
            if source.tag.trim().is_empty() {
                return Err(SettingsError::Invalid(format!(
                    "source {} has an empty tag",
                    source.url
                )));
            }
            if !tags.insert(source.tag.as_str()) {
                return Err(SettingsError::Invalid(format!(
                    "duplicate source tag {:?}",
                    source.tag
                )));
            }
            Url::parse(&source.url).map_err(|e| {
                SettingsError::Invalid(format!("source {}: bad url {:?}: {}", source.tag, source.url, e))
            })?;
        }

        if self.fetch.timeout_secs == 0 {
            return Err(SettingsError::Invalid("fetch.timeout_secs must be > 0".into()));
        }
        if self.fetch.max_concurrent == 0 {
            return Err(SettingsError::Invalid("fetch.max_concurrent must be > 0".into()));
        }
        // Room for a tag, a separator and a `-NN` suffix.
        if self.naming.max_length < 8 {
            return Err(SettingsError::Invalid("naming.max_length must be >= 8".into()));
        }

        let groups = &self.groups;
        if groups.url_test_name.trim().is_empty() || groups.select_name.trim().is_empty() {
            return Err(SettingsError::Invalid("group names must not be empty".into()));
        }
        if groups.url_test_name == groups.select_name {
            return Err(SettingsError::Invalid("group names must differ".into()));
        }
        Ok(())
    }
}
