//! Catalog ingestion through the filesystem.

use std::io::Write;

use marquee::catalog::load_events_csv;
use marquee::config::EngineConfig;
use marquee::engine::ChatEngine;
use marquee::error::Result;
use tempfile::NamedTempFile;

const SAMPLE_CSV: &str = "\
name,description,start_time,end_time,venue,city,category,genre,price
Rock Night,loud guitars on the river stage,2024-06-12 20:00:00,2024-06-12 23:00:00,Skenderija,Sarajevo,Concert,Rock,15 BAM
Jazz Evening,smooth jazz trio,2024-06-20 21:00:00,2024-06-20 23:30:00,Dom Mladih,Sarajevo,Concert,Jazz,25 BAM
,missing name,2024-06-25 20:00:00,2024-06-25 22:00:00,Hall,Mostar,Concert,Pop,10 BAM
Art Fair,contemporary paintings,2024-07-01 10:00:00,2024-07-10 18:00:00,City Gallery,Mostar,Exhibition,Art,
";

#[test]
fn loads_a_catalog_file_and_skips_bad_rows() -> Result<()> {
    let file = write_catalog(SAMPLE_CSV)?;
    let catalog = load_events_csv(file.path())?;

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.events()[0].name, "Rock Night");
    assert_eq!(catalog.events()[0].city, "sarajevo");
    assert_eq!(catalog.events()[2].price, "N/A");
    Ok(())
}

#[test]
fn loaded_catalog_exposes_normalized_distinct_values() -> Result<()> {
    let file = write_catalog(SAMPLE_CSV)?;
    let catalog = load_events_csv(file.path())?;

    assert_eq!(catalog.distinct_cities(), ["mostar", "sarajevo"]);
    assert_eq!(catalog.distinct_categories(), ["concert", "exhibition"]);
    Ok(())
}

#[test]
fn a_loaded_catalog_drives_the_engine() -> Result<()> {
    let file = write_catalog(SAMPLE_CSV)?;
    let catalog = load_events_csv(file.path())?;
    let engine = ChatEngine::new(catalog, EngineConfig::default())?;

    let reply = engine.handle_message("jazz in sarajevo");
    let events = reply.as_events().expect("expected event summaries");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Jazz Evening");
    Ok(())
}

#[test]
fn missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    assert!(load_events_csv(&path).is_err());
}

fn write_catalog(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}
