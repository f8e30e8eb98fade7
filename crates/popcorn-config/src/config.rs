use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the movie metadata provider.
///
/// The API key is not stored here; it lives in the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this never reach the network
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Window title shown when no movie detail is open
    #[serde(default = "default_app_title")]
    pub app_title: String,
    #[serde(default = "default_max_rating")]
    pub max_rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON logs. Non-terminal output switches to JSON regardless.
    #[serde(default)]
    pub json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_min_query_len() -> usize {
    3
}

fn default_app_title() -> String {
    "usePopcorn".to_string()
}

fn default_max_rating() -> u8 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { min_query_len: default_min_query_len() }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            max_rating: default_max_rating(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.omdb.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("omdb.base_url cannot be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL, got: {}", base_url));
        }

        if self.search.min_query_len == 0 {
            return Err(anyhow::anyhow!("search.min_query_len must be at least 1"));
        }

        // Watched entries store the user rating on a 0-10 scale
        if !(1..=10).contains(&self.ui.max_rating) {
            return Err(anyhow::anyhow!("ui.max_rating must be between 1 and 10, got: {}", self.ui.max_rating));
        }

        Ok(())
    }
}
