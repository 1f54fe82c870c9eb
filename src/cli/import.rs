use std::path::Path;

use colored::Colorize;

use crate::cli::resolve_db;
use crate::db::TABLE;
use crate::error::Result;
use crate::importer::{ImportOptions, Importer};
use crate::settings::Settings;

pub fn run(file: &Path, db: Option<&str>, no_validate: bool, backup: bool, settings: &Settings) -> Result<()> {
    let db_path = resolve_db(db, settings);
    let options = ImportOptions {
        validate: settings.validate && !no_validate,
        backup,
    };

    let summary = Importer::new(options).run(file, &db_path)?;

    if let Some(path) = &summary.backup {
        println!("Previous database saved to {}", path.display());
    }
    println!(
        "{} {} of {} rows into {TABLE} ({})",
        "Imported".green().bold(),
        summary.inserted,
        summary.read,
        db_path.display()
    );
    if !summary.skipped.is_empty() {
        println!("{}", format!("{} rows skipped:", summary.skipped.len()).yellow());
        for skipped in &summary.skipped {
            println!("  line {}: {}", skipped.line, skipped.reason);
        }
    }
    Ok(())
}
