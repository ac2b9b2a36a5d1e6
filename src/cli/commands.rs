//! Command implementations for the marquee CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::catalog::load_events_csv;
use crate::cli::args::{AskArgs, ChatArgs, Command, MarqueeArgs, StatsArgs};
use crate::cli::output::{EngineStats, print_reply, print_stats};
use crate::config::EngineConfig;
use crate::engine::ChatEngine;
use crate::error::{MarqueeError, Result};
use crate::extract::normalize_price;
use crate::intent::CatalogVocabulary;

/// Execute a CLI command.
pub fn execute_command(args: MarqueeArgs) -> Result<()> {
    match &args.command {
        Command::Ask(ask_args) => run_ask(ask_args.clone(), &args),
        Command::Chat(chat_args) => run_chat(chat_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Answer a single message and print the reply.
fn run_ask(args: AskArgs, cli_args: &MarqueeArgs) -> Result<()> {
    let engine = load_engine(&args.catalog, cli_args)?;

    let reply = match &args.date {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                MarqueeError::invalid_argument(format!("invalid --date {raw:?}: {e}"))
            })?;
            engine.handle_message_at(&args.message, date)
        }
        None => engine.handle_message(&args.message),
    };

    print_reply(&reply, cli_args)
}

/// Read messages from stdin until EOF or a quit word.
fn run_chat(args: ChatArgs, cli_args: &MarqueeArgs) -> Result<()> {
    let engine = load_engine(&args.catalog, cli_args)?;

    if cli_args.verbosity() > 0 {
        println!(
            "Loaded {} events. Type 'quit' or 'exit' to leave.",
            engine.catalog().len()
        );
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = engine.handle_message(message);
        print_reply(&reply, cli_args)?;
    }

    Ok(())
}

/// Report catalog and engine statistics.
fn show_stats(args: StatsArgs, cli_args: &MarqueeArgs) -> Result<()> {
    let engine = load_engine(&args.catalog, cli_args)?;
    let catalog = engine.catalog();
    let vocabulary = CatalogVocabulary::from_catalog(catalog);

    let stats = EngineStats {
        total_events: catalog.len(),
        distinct_cities: catalog.distinct_cities().len(),
        distinct_categories: catalog.distinct_categories().len(),
        distinct_genres: catalog.distinct_genres().len(),
        priced_events: catalog
            .iter()
            .filter(|e| normalize_price(&e.price).is_some())
            .count(),
        dated_events: catalog
            .iter()
            .filter(|e| e.parsed_start().is_some())
            .count(),
        vocabulary_phrases: vocabulary.len(),
        recommender_enabled: engine.recommender().is_enabled(),
        distance_metric: engine.recommender().metric().name().to_string(),
    };

    print_stats(&stats, cli_args)
}

/// Load the catalog and assemble an engine from the CLI flags.
fn load_engine(catalog_path: &Path, cli_args: &MarqueeArgs) -> Result<ChatEngine> {
    let config = match &cli_args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    if cli_args.verbosity() > 1 {
        println!("Loading catalog from: {}", catalog_path.display());
    }

    let catalog = load_events_csv(catalog_path)?;
    ChatEngine::new(catalog, config)
}
