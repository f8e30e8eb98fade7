use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, search, show};
use popcorn_config::{Config, PathManager};

mod commands;
mod logging;
mod output;
mod progress;
mod render;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "popcorn - search movies, rate them, keep a watched list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// OMDb API key (overrides the stored key and POPCORN_OMDB_API_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie database by title and print the matches. Queries shorter than the configured minimum length (3 by default) are not sent.")]
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show details for one movie
    Show {
        /// IMDb id, e.g. tt1375666
        imdb_id: String,
    },
    /// Interactive search, rating and watched list (default)
    #[command(long_about = "Browse interactively: search for movies, open one to see its details, rate it and add it to your watched list. The watched list lives for the duration of the session.")]
    Browse,
    /// Configure the OMDb connection
    #[command(long_about = "Show or change configuration. The API key is stored in the credentials file next to config.toml.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the OMDb API key and/or base URL
    #[command(long_about = "Store the OMDb API key and base URL. Prompts for the key when it is not passed. Get a key at https://www.omdbapi.com/apikey.aspx.")]
    Omdb {
        /// OMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL of an OMDb-compatible API
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let log_file = config
        .logging
        .file
        .as_deref()
        .map(|file| path_manager.resolve_log_file(file));
    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Search { query } => {
            let app = commands::build_controller(&config, &path_manager, cli.api_key)?;
            search::run_search(app, query.join(" "), &output).await
        }
        Commands::Show { imdb_id } => {
            let app = commands::build_controller(&config, &path_manager, cli.api_key)?;
            show::run_show(app, imdb_id, &output).await
        }
        Commands::Browse => {
            let app = commands::build_controller(&config, &path_manager, cli.api_key)?;
            browse::run_browse(app, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, config, &path_manager, &output).await
        }
    }
}
