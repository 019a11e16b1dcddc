use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lookup_client::{WordLookup, WordLookupClient};
use shared::{
    domain::LookupMode,
    error::{ErrorReport, LookupError},
    protocol::WordQuery,
};
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use config::{load_settings, CliOverrides, Settings};
use controller::state::PageController;
use ui::render::render_result;

/// Look up rhymes and similar-meaning words.
#[derive(Parser, Debug)]
#[command(name = "wordfinder", version)]
struct Cli {
    /// Config file (defaults to ./wordfinder.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the word-lookup service.
    #[arg(long)]
    base_url: Option<String>,
    /// Maximum number of words requested per lookup.
    #[arg(long)]
    max_results: Option<u32>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show rhymes for a word, grouped by syllable count.
    Rhymes(LookupArgs),
    /// Show words with a similar meaning.
    Similar(LookupArgs),
    /// Interactive prompt with a saved-words list.
    Interactive {
        /// Group results by this record field instead of the default.
        #[arg(long)]
        group_by: Option<String>,
    },
}

#[derive(Args, Debug)]
struct LookupArgs {
    word: String,
    /// Print the grouped result as JSON.
    #[arg(long)]
    json: bool,
    /// Group results by this record field (`word`, `score`, `numSyllables`).
    #[arg(long)]
    group_by: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Command::Interactive { .. } => "warn",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let settings = load_settings(&CliOverrides {
        config_path: cli.config.clone(),
        api_base_url: cli.base_url.clone(),
        max_results: cli.max_results,
    })?;
    tracing::debug!(?settings, "settings loaded");

    let client = WordLookupClient::with_timeout(&settings.api_base_url, settings.request_timeout())?;

    match cli.command {
        Command::Rhymes(args) => lookup_once(&client, &settings, LookupMode::Rhymes, args),
        Command::Similar(args) => {
            lookup_once(&client, &settings, LookupMode::SimilarMeaning, args)
        }
        Command::Interactive { group_by } => {
            let controller = PageController::new(settings.max_results, group_by);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            ui::repl::run_interactive(
                Arc::new(client),
                controller,
                settings.request_timeout() + Duration::from_secs(1),
                stdin.lock(),
                &mut stdout,
            )
        }
    }
}

fn lookup_once(
    client: &WordLookupClient,
    settings: &Settings,
    mode: LookupMode,
    args: LookupArgs,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    let query = WordQuery::new(mode, args.word).with_max_results(settings.max_results);
    let outcome: Result<_, LookupError> =
        runtime.block_on(client.find(query, args.group_by.as_deref()));

    match outcome {
        Ok(result) if args.json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Ok(result) => {
            println!("{}", render_result(&result));
            Ok(())
        }
        Err(err) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?);
            }
            Err(err).context("word lookup failed")
        }
    }
}
