//! CSV catalog ingestion.
//!
//! The loader reads a headered CSV file into [`EventRecord`]s. Ingestion is a
//! strict filter: any row missing a non-empty value for one of the essential
//! fields is skipped with a logged warning, never propagated as an error.
//! Categorical fields are lowercased here so the rest of the crate can rely
//! on normalized casing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::catalog::event::EventRecord;
use crate::error::Result;

/// Fields every ingested row must carry with a non-empty value.
pub const ESSENTIAL_FIELDS: &[&str] = &[
    "name",
    "start_time",
    "end_time",
    "venue",
    "city",
    "category",
    "genre",
];

/// Load a catalog from a CSV file path.
///
/// A missing or unreadable file is a startup error; malformed rows inside the
/// file are skipped row by row.
pub fn load_events_csv<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let file = File::open(path.as_ref())?;
    let catalog = read_events_csv(file)?;
    debug!(
        path = %path.as_ref().display(),
        events = catalog.len(),
        "loaded event catalog"
    );
    Ok(catalog)
}

/// Read a catalog from any CSV byte source with a header row.
pub fn read_events_csv<R: Read>(input: R) -> Result<Catalog> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut events = Vec::new();

    for (index, record) in reader.records().enumerate() {
        // Header is line 1, so data rows start at line 2.
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(line, %error, "skipping malformed catalog row");
                continue;
            }
        };

        let field = |name: &str| -> &str {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| record.get(i))
                .unwrap_or("")
        };

        if let Some(missing) = ESSENTIAL_FIELDS
            .iter()
            .find(|name| field(name).trim().is_empty())
        {
            warn!(line, field = *missing, "event row missing essential field, skipping");
            continue;
        }

        events.push(EventRecord {
            name: field("name").trim().to_string(),
            description: field("description").trim().to_string(),
            start_time: field("start_time").trim().to_string(),
            end_time: field("end_time").trim().to_string(),
            venue: field("venue").trim().to_string(),
            city: field("city").trim().to_lowercase(),
            category: field("category").trim().to_lowercase(),
            genre: field("genre").trim().to_lowercase(),
            price: {
                let price = field("price").trim();
                if price.is_empty() {
                    "N/A".to_string()
                } else {
                    price.to_string()
                }
            },
        });
    }

    Ok(Catalog::new(events))
}
