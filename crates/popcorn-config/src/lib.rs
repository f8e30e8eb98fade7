pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, SearchConfig, UiConfig, DEFAULT_OMDB_BASE_URL};
pub use credentials::{CredentialStore, OMDB_API_KEY_ENV};
pub use paths::{container_base_path, PathManager, BASE_PATH_ENV};
