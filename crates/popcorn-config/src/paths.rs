use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable that relocates all popcorn files.
pub const BASE_PATH_ENV: &str = "POPCORN_BASE_PATH";

/// Base directory override from `POPCORN_BASE_PATH`, if it is set and exists.
pub fn container_base_path() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.exists())
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("popcorn");

        Ok(Self::with_base(base_dir))
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Where `[logging] file` points: relative paths live under `logs/`.
    pub fn resolve_log_file(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.log_dir.join(file)
        }
    }

    /// Creates the config directory. The log directory is created by the
    /// file appender when file logging is on.
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = container_base_path() {
            return Self::with_base(base);
        }

        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".popcorn")))
    }
}
