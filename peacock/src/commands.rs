//! One-shot CLI commands that work on the library without the server

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use peacock_core::config::Config;
use peacock_core::record::{AudioMetadataRecord, TitleSuggestion, TitleUpdate};
use peacock_core::tags::TagAccessor;
use peacock_library::{LoftyTagAccessor, ScanOptions, ScanReport, Scanner, TitleSuggester, TitleUpdater};
use std::path::Path;
use tracing::info;

/// Override the configured root with a path given on the command line.
pub fn with_root(mut config: Config, path: Option<Utf8PathBuf>) -> Config {
    if let Some(path) = path {
        config.set_root(path);
    }
    config
}

pub fn scan_library<A: TagAccessor>(config: &Config, accessor: A) -> Result<ScanReport> {
    let root = config.require_root()?;
    let scanner = Scanner::new(accessor).with_extensions(&config.library.audio_extensions);
    Ok(scanner.scan(root, &ScanOptions::from(&config.library))?)
}

pub fn scan(config: &Config, json: bool) -> Result<()> {
    let report = scan_library(config, LoftyTagAccessor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
        return Ok(());
    }

    println!("Library: {}", config.library.root);
    for record in &report.records {
        println!("  {}", record_line(record));
    }
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.path, skipped.reason);
    }
    println!(
        "\n{} file(s) loaded, {} skipped",
        report.records.len(),
        report.skipped.len()
    );
    Ok(())
}

pub fn suggest(config: &Config, json: bool) -> Result<()> {
    let report = scan_library(config, LoftyTagAccessor)?;
    let suggestions = TitleSuggester::new().suggest_all(&report.records);

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print_suggestions(&suggestions);
    }
    Ok(())
}

pub fn apply(config: &Config, dry_run: bool) -> Result<()> {
    let report = scan_library(config, LoftyTagAccessor)?;
    let suggestions = TitleSuggester::new().suggest_all(&report.records);
    print_suggestions(&suggestions);

    if dry_run || suggestions.is_empty() {
        return Ok(());
    }

    let updates: Vec<TitleUpdate> = suggestions.into_iter().map(TitleUpdate::from).collect();
    let batch = TitleUpdater::new(LoftyTagAccessor).update_many(&updates);

    println!(
        "\nUpdated {} file(s), {} failed",
        batch.success_count, batch.failed_count
    );
    for failure in batch.failures() {
        println!(
            "  {}: {}",
            failure.file_path,
            failure.error.as_deref().unwrap_or("unknown error")
        );
    }

    if batch.failed_count > 0 {
        anyhow::bail!("{} title update(s) failed", batch.failed_count);
    }
    Ok(())
}

/// Write a config with `root` as the library directory, keeping any other
/// settings already loaded.
pub fn init(
    mut config: Config,
    config_path: &Path,
    root: &Utf8Path,
    title: Option<String>,
) -> Result<()> {
    config.set_root(root);
    if let Some(title) = title {
        config.report.title = title;
    }
    config.require_root()?;

    config.save_to_path(config_path)?;
    info!("Configuration written to {}", config_path.display());
    println!("Wrote {}", config_path.display());
    Ok(())
}

fn record_line(record: &AudioMetadataRecord) -> String {
    format!(
        "{:<40} {:>8} {:>10}  {}",
        record.filename,
        record.duration_formatted,
        record.file_size_formatted,
        record.display_title()
    )
}

fn print_suggestions(suggestions: &[TitleSuggestion]) {
    if suggestions.is_empty() {
        println!("All titles look good");
        return;
    }

    for suggestion in suggestions {
        println!(
            "{}\n  {:?} -> {:?}",
            suggestion.file_path, suggestion.current_title, suggestion.suggested_title
        );
    }
    println!("\n{} suggestion(s)", suggestions.len());
}
