use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rooster_rust::api::{collect_teachers, generate_calendars, GenerateOptions};
use rooster_rust::core::domain::SHARED_TOKEN;
use rooster_rust::io::archive::ARCHIVE_NAME;
use rooster_rust::io::config::GeneratorConfig;
use rooster_rust::io::loaders::ScheduleLoader;
use rooster_rust::parsing::columns::detect_columns;

fn generate_all(input: &Path, out_dir: &Path, config: &GeneratorConfig) -> Result<(usize, usize)> {
    println!("Reading roster from: {}", input.display());
    let loaded = ScheduleLoader::load_from_file(input)?;
    println!("Loaded {} rows ({:?})", loaded.num_rows, loaded.source_type);

    // Configured column names win; detection fills whatever the config
    // leaves open.
    let detected = detect_columns(&loaded.table);
    let map = config.column_map(&detected);

    let roster = collect_teachers(&loaded.table, &map)?;
    let teachers: Vec<String> = if config.generation.teachers.is_empty() {
        roster
            .iter()
            .filter(|t| t.as_str() != SHARED_TOKEN)
            .cloned()
            .collect()
    } else {
        config.generation.teachers.clone()
    };
    println!(
        "Generating calendars for {} of {} teachers...",
        teachers.len(),
        roster.len()
    );

    let options = GenerateOptions {
        include_shared: config.generation.include_shared,
        shared_inclusion: HashMap::new(),
    };
    let bundle = generate_calendars(&loaded.table, &map, &teachers, &options)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    for calendar in &bundle.calendars {
        let path = out_dir.join(format!("{}.ics", calendar.teacher));
        fs::write(&path, &calendar.document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ {} ({} events)", path.display(), calendar.num_entries);
    }
    for error in &bundle.report.errors {
        println!("✗ {}", error);
    }

    match bundle.zip_archive() {
        Ok(bytes) => {
            let path = out_dir.join(ARCHIVE_NAME);
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ {}", path.display());
        }
        Err(e) => println!("✗ {}", e),
    }

    let stats = &bundle.report.stats;
    println!();
    println!(
        "Rows: {} | Entries: {} | Skipped: {} | Warnings: {}",
        stats.total_rows,
        stats.entries_built,
        stats.rows_skipped,
        bundle.report.warnings.len()
    );

    Ok((bundle.calendars.len(), bundle.report.errors.len()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .map(|s| s.as_str())
        .context("Usage: generate_calendars <schedule-file> [output-dir]")?;
    let out_dir = args.get(2).map(|s| s.as_str()).unwrap_or(".");
    let config_path = std::env::var("ROOSTER_CONFIG").ok();

    println!("=== Rooster Calendar Generator ===");
    println!("Input file: {}", input);
    println!("Output directory: {}", out_dir);
    if let Some(path) = &config_path {
        println!("Config file: {}", path);
    }
    println!();

    let config = match &config_path {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    match generate_all(Path::new(input), Path::new(out_dir), &config) {
        Ok((generated, failed)) => {
            println!();
            if failed == 0 {
                println!("✓ Generated {} calendar(s) successfully!", generated);
            } else {
                println!(
                    "✓ Generated {} calendar(s); {} failed (see above)",
                    generated, failed
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Generation failed: {}", e);
            Err(e)
        }
    }
}
