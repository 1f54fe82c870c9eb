use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::resolve_db;
use crate::db::{self, get_connection, TABLE};
use crate::error::Result;
use crate::fmt::{amount, format_bytes};
use crate::settings::Settings;

const RECENT_ROWS: usize = 5;

pub fn run(db: Option<&str>, settings: &Settings) -> Result<()> {
    let db_path = resolve_db(db, settings);
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `stmtload import <file>` to create it.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_path)?.len();
    println!("DB size:    {}", format_bytes(size));

    let conn = get_connection(&db_path)?;
    if !db::table_exists(&conn)? {
        println!();
        println!("No {TABLE} table yet.");
        return Ok(());
    }

    let count = db::count_rows(&conn)?;
    println!("Rows:       {count}");
    if let Some((first, last)) = db::started_date_range(&conn)? {
        println!("Started:    {first} .. {last}");
    }

    let recent = db::fetch_transactions(&conn, Some(RECENT_ROWS))?;
    if recent.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Started", "Type", "Description", "Amount", "Fee", "Currency", "State", "Balance"]);
    for t in recent {
        let amt = if t.amount < 0.0 {
            amount(t.amount).red()
        } else {
            amount(t.amount).green()
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(t.started_date),
            Cell::new(t.kind),
            Cell::new(t.description),
            Cell::new(amt),
            Cell::new(amount(t.fee)),
            Cell::new(t.currency),
            Cell::new(t.state),
            Cell::new(t.balance.map(amount).unwrap_or_default()),
        ]);
    }
    println!();
    println!("{table}");
    Ok(())
}
