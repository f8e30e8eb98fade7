pub mod browse;
pub mod config;
pub mod prompts;
pub mod search;
pub mod show;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, CredentialStore, PathManager, OMDB_API_KEY_ENV};
use popcorn_core::{Controller, ControllerOptions};
use popcorn_sources::{OmdbClient, SourceError};

/// Key precedence: `--api-key`, then the environment, then credentials.toml.
pub fn resolve_api_key(cli_key: Option<String>, path_manager: &PathManager) -> Result<Option<String>> {
    if let Some(key) = cli_key.filter(|k| !k.trim().is_empty()) {
        return Ok(Some(key));
    }

    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store.load().map_err(|e| {
        eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e)
    })?;
    Ok(store.resolve_omdb_api_key())
}

pub fn build_controller(
    config: &Config,
    path_manager: &PathManager,
    cli_key: Option<String>,
) -> Result<Controller<OmdbClient>> {
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", path_manager.config_file().display(), e))?;

    let api_key = resolve_api_key(cli_key, path_manager)?;
    let client = OmdbClient::from_config(&config.omdb, api_key).map_err(|e| match e {
        SourceError::MissingApiKey => eyre!(
            "No OMDb API key configured. Run 'popcorn config omdb', set {} or pass --api-key.",
            OMDB_API_KEY_ENV
        ),
        other => eyre!(other),
    })?;

    tracing::debug!(base_url = %client.base_url(), "Using OMDb source");
    Ok(Controller::new(client, ControllerOptions::from(config)))
}
