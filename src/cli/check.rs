use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::importer::check_file;

/// Returns whether every row passed validation.
pub fn run(file: &Path) -> Result<bool> {
    let summary = check_file(file)?;

    if summary.skipped.is_empty() {
        println!("{} all {} rows are valid", "OK".green().bold(), summary.read);
        return Ok(true);
    }

    let mut table = Table::new();
    table.set_header(vec!["Line", "Problem"]);
    for skipped in &summary.skipped {
        table.add_row(vec![Cell::new(skipped.line), Cell::new(skipped.reason.to_string())]);
    }
    println!("{table}");
    println!(
        "{} {} of {} rows are invalid",
        "FAILED".red().bold(),
        summary.skipped.len(),
        summary.read
    );
    Ok(false)
}
