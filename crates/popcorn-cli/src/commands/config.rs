use crate::commands::prompts::{prompt_password, prompt_string};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use popcorn_config::{Config, CredentialStore, PathManager, OMDB_API_KEY_ENV};
use serde_json::json;

pub async fn run_config(
    cmd: crate::ConfigCommands,
    config: Config,
    path_manager: &PathManager,
    output: &Output,
) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, &config, path_manager, output),
        crate::ConfigCommands::Omdb { api_key, base_url } => {
            configure_omdb(api_key, base_url, config, path_manager, output)
        }
    }
}

/// Where the effective API key comes from, for display.
fn key_source(store: &CredentialStore) -> (&'static str, Option<String>) {
    if let Some(key) = std::env::var(OMDB_API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
        return ("environment", Some(key));
    }
    match store.get_omdb_api_key() {
        Some(key) => ("credentials file", Some(key.clone())),
        None => ("not set", None),
    }
}

fn show_config(full: bool, config: &Config, path_manager: &PathManager, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let credentials_file = path_manager.credentials_file();

    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    let (source, key) = key_source(&store);
    let key_display = match key {
        Some(key) if full => key,
        Some(key) => mask_string(&key),
        None => "<not set>".to_string(),
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "api_key": key_display,
                "api_key_source": source,
            },
            "search": config.search,
            "ui": config.ui,
            "logging": config.logging,
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at: {} (using defaults)",
            config_file.display()
        ));
    }

    println!("\n{}", "Configuration".bright_cyan().bold());

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("OMDb base URL", config.omdb.base_url.clone()),
        ("OMDb API key", format!("{} ({})", key_display, source)),
        ("Minimum query length", config.search.min_query_len.to_string()),
        ("App title", config.ui.app_title.clone()),
        ("Max rating", config.ui.max_rating.to_string()),
        ("Log level", config.logging.level.clone()),
        (
            "Log format",
            if config.logging.json { "json" } else { "text" }.to_string(),
        ),
        (
            "Log file",
            config
                .logging
                .file
                .as_deref()
                .map(|p| path_manager.resolve_log_file(p).display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.block(table);

    Ok(())
}

fn configure_omdb(
    api_key: Option<String>,
    base_url: Option<String>,
    mut config: Config,
    path_manager: &PathManager,
    output: &Output,
) -> Result<()> {
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;

    let interactive = api_key.is_none() && base_url.is_none();

    let api_key = match api_key {
        Some(key) => Some(key),
        None if interactive => {
            output.info("Get a free key at https://www.omdbapi.com/apikey.aspx");
            let key = prompt_password("OMDb API key")?;
            Some(key)
        }
        None => None,
    };
    let base_url = match base_url {
        Some(url) => Some(url),
        None if interactive => Some(prompt_string("OMDb base URL", Some(&config.omdb.base_url))?),
        None => None,
    };

    if let Some(url) = base_url {
        config.omdb.base_url = url.trim().to_string();
        config
            .validate()
            .map_err(|e| eyre!("Invalid OMDb base URL: {}", e))?;
        let config_file = path_manager.config_file();
        config
            .save_to_file(&config_file)
            .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
        output.success(format!("OMDb base URL set to {}", config.omdb.base_url));
    }

    if let Some(key) = api_key {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(eyre!("API key cannot be empty"));
        }
        let credentials_file = path_manager.credentials_file();
        let mut store = CredentialStore::new(credentials_file.clone());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
        store.set_omdb_api_key(key);
        store
            .save()
            .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
        output.success(format!("OMDb API key saved to {}", credentials_file.display()));
    }

    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.chars().count() <= 4 {
        return "*".repeat(s.chars().count());
    }
    let chars: Vec<char> = s.chars().collect();
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
