use clap::Parser;
use std::process::ExitCode;
use structdata::api::DataApi;
use structdata::config::DataConfig;
use structdata::error::Result;
use structdata::store::memory::InMemoryStore;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::html::CliContext;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DataConfig::load(cli.config.as_deref())?;
    let store = match &cli.aliases {
        Some(path) => InMemoryStore::from_json_file(path)?,
        None => InMemoryStore::new(),
    };
    let api = DataApi::new(store, config);
    let mut ctx = CliContext {
        user: cli.user,
        groups: cli.groups,
        id: cli.id,
        lang: cli.lang,
    };

    match cli.command {
        Commands::Column { token } => cli::handle_column(&api, &token).map(|_| true),
        Commands::Clean { type_tag, value } => {
            cli::handle_clean(&api, &type_tag, &value).map(|_| true)
        }
        Commands::Filter { lines } => cli::handle_filter(&api, &lines),
        Commands::Format { column, value } => {
            cli::handle_format(&api, &mut ctx, &column, &value).map(|_| true)
        }
    }
}
