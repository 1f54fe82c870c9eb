use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::db::{self, get_connection};
use crate::error::{ImportError, Result};
use crate::models::{ColumnIndex, StatementRow};
use crate::validator::{self, InvalidRecord};

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Receives progress events from an import run. Every method has a no-op
/// default so implementations only handle what they care about.
pub trait ImportObserver {
    fn connected(&self, _db_path: &Path) {}
    fn backed_up(&self, _backup_path: &Path) {}
    fn table_created(&self) {}
    fn row_inserted(&self, _row: &StatementRow) {}
    fn row_skipped(&self, _row: &StatementRow, _reason: &InvalidRecord) {}
    fn committed(&self, _inserted: usize) {}
    fn closed(&self) {}
}

/// Reports import progress as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn connected(&self, db_path: &Path) {
        info!(db = %db_path.display(), "Connected to database successfully");
    }

    fn backed_up(&self, backup_path: &Path) {
        info!(backup = %backup_path.display(), "Previous database saved");
    }

    fn table_created(&self) {
        info!(table = db::TABLE, "Table created successfully");
    }

    fn row_inserted(&self, row: &StatementRow) {
        debug!(line = row.line, values = ?row.values, "Row inserted");
    }

    fn row_skipped(&self, row: &StatementRow, reason: &InvalidRecord) {
        warn!(line = row.line, "Skipping row: {reason}");
    }

    fn committed(&self, inserted: usize) {
        info!(rows = inserted, "Data inserted successfully");
    }

    fn closed(&self) {
        info!("Database connection closed");
    }
}

// ---------------------------------------------------------------------------
// Importer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Run each row through the validator and skip the ones that fail.
    pub validate: bool,
    /// Snapshot the database before an existing table is dropped.
    pub backup: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            validate: true,
            backup: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: InvalidRecord,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportSummary {
    pub read: usize,
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
    pub backup: Option<PathBuf>,
}

pub struct Importer<O = TracingObserver> {
    options: ImportOptions,
    observer: O,
}

impl Importer<TracingObserver> {
    pub fn new(options: ImportOptions) -> Self {
        Self::with_observer(options, TracingObserver)
    }
}

impl<O: ImportObserver> Importer<O> {
    pub fn with_observer(options: ImportOptions, observer: O) -> Self {
        Self { options, observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Replaces the `Transactions` table in `db_path` with the rows of the CSV
    /// file at `source`.
    ///
    /// The table is dropped and recreated before the source is opened, so it
    /// exists (empty) even when reading the source fails. All inserts share a
    /// single transaction: any error rolls back every row of the run.
    pub fn run(&self, source: &Path, db_path: &Path) -> Result<ImportSummary> {
        let mut conn = get_connection(db_path)?;
        self.observer.connected(db_path);

        let mut summary = ImportSummary::default();
        if self.options.backup && db::table_exists(&conn)? {
            let path = db::snapshot(&conn, db_path)?;
            self.observer.backed_up(&path);
            summary.backup = Some(path);
        }

        db::recreate_table(&conn)?;
        self.observer.table_created();

        let mut rdr = open_source(source)?;
        let index = ColumnIndex::resolve(rdr.headers()?)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(db::INSERT)?;
            for result in rdr.records() {
                let row = StatementRow::from_record(&result?, &index);
                summary.read += 1;

                if self.options.validate {
                    if let Err(reason) = validator::validate(&row.to_value()) {
                        self.observer.row_skipped(&row, &reason);
                        summary.skipped.push(SkippedRow { line: row.line, reason });
                        continue;
                    }
                }

                stmt.execute(rusqlite::params_from_iter(row.params()))?;
                self.observer.row_inserted(&row);
                summary.inserted += 1;
            }
        }
        tx.commit()?;
        self.observer.committed(summary.inserted);

        conn.close().map_err(|(_, e)| e)?;
        self.observer.closed();

        Ok(summary)
    }
}

/// Reads and validates every row of `source` without touching a database.
pub fn check_file(source: &Path) -> Result<ImportSummary> {
    let mut rdr = open_source(source)?;
    let index = ColumnIndex::resolve(rdr.headers()?)?;

    let mut summary = ImportSummary::default();
    for result in rdr.records() {
        let row = StatementRow::from_record(&result?, &index);
        summary.read += 1;
        match validator::validate(&row.to_value()) {
            Ok(()) => summary.inserted += 1,
            Err(reason) => summary.skipped.push(SkippedRow { line: row.line, reason }),
        }
    }
    Ok(summary)
}

fn open_source(source: &Path) -> Result<csv::Reader<std::io::BufReader<std::fs::File>>> {
    let file = std::fs::File::open(source).map_err(|e| ImportError::Source {
        path: source.to_path_buf(),
        source: e,
    })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(std::io::BufReader::new(file)))
}
