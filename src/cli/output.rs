//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{MarqueeArgs, OutputFormat};
use crate::error::Result;
use crate::respond::Reply;

/// Catalog and engine statistics reported by the `stats` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_events: usize,
    pub distinct_cities: usize,
    pub distinct_categories: usize,
    pub distinct_genres: usize,
    pub priced_events: usize,
    pub dated_events: usize,
    pub vocabulary_phrases: usize,
    pub recommender_enabled: bool,
    pub distance_metric: String,
}

/// Print a reply in the configured format.
pub fn print_reply(reply: &Reply, args: &MarqueeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", render_reply_human(reply));
            Ok(())
        }
        OutputFormat::Json => print_json(reply, args),
    }
}

/// Print engine statistics in the configured format.
pub fn print_stats(stats: &EngineStats, args: &MarqueeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", render_stats_human(stats));
            Ok(())
        }
        OutputFormat::Json => print_json(stats, args),
    }
}

/// Render a reply as human-readable text.
fn render_reply_human(reply: &Reply) -> String {
    match reply {
        Reply::Text { text } => text.clone(),
        Reply::Events { events } => {
            let label = if events.len() == 1 { "event" } else { "events" };
            let mut out = format!("Found {} {label}:\n", events.len());
            for (i, event) in events.iter().enumerate() {
                out.push_str(&format!("{}. {event}\n", i + 1));
            }
            out.trim_end().to_string()
        }
    }
}

/// Render engine statistics as human-readable text.
fn render_stats_human(stats: &EngineStats) -> String {
    let mut out = String::new();
    out.push_str("Catalog Statistics:\n");
    out.push_str("═══════════════════\n");
    out.push_str(&format!("Total events: {}\n", stats.total_events));
    out.push_str(&format!("Distinct cities: {}\n", stats.distinct_cities));
    out.push_str(&format!("Distinct categories: {}\n", stats.distinct_categories));
    out.push_str(&format!("Distinct genres: {}\n", stats.distinct_genres));
    out.push_str(&format!("Events with a price: {}\n", stats.priced_events));
    out.push_str(&format!("Events with a start date: {}\n", stats.dated_events));
    out.push_str(&format!("Vocabulary phrases: {}\n", stats.vocabulary_phrases));
    out.push_str(&format!("Recommender enabled: {}\n", stats.recommender_enabled));
    out.push_str(&format!("Distance metric: {}", stats.distance_metric));
    out
}

/// Print any serializable value as JSON.
fn print_json<T: Serialize>(value: &T, args: &MarqueeArgs) -> Result<()> {
    let rendered = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
