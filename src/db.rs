use std::path::{Path, PathBuf};

use rusqlite::backup::Backup;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::Transaction;

pub const TABLE: &str = "Transactions";

pub const SCHEMA: &str = "
CREATE TABLE Transactions (
    TransactionID INTEGER PRIMARY KEY AUTOINCREMENT,
    Type TEXT,
    Product TEXT,
    Started_Date TEXT,
    Completed_Date TEXT,
    Description TEXT,
    Amount DECIMAL CHECK (typeof(Amount) IN ('integer', 'real')),
    Fee DECIMAL CHECK (typeof(Fee) IN ('integer', 'real')),
    Currency TEXT,
    State TEXT,
    Balance DECIMAL CHECK (Balance IS NULL OR typeof(Balance) IN ('integer', 'real'))
);
";

pub const INSERT: &str = "INSERT INTO Transactions \
    (Type, Product, Started_Date, Completed_Date, Description, Amount, Fee, Currency, State, Balance) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    Ok(Connection::open(db_path)?)
}

/// Drops any previous `Transactions` table and creates an empty one.
pub fn recreate_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {TABLE};\n{SCHEMA}"))?;
    Ok(())
}

pub fn table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    Ok(stmt.exists([TABLE])?)
}

pub fn count_rows(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row(&format!("SELECT count(*) FROM {TABLE}"), [], |r| r.get(0))?)
}

/// Earliest and latest `Started_Date`, compared as text.
pub fn started_date_range(conn: &Connection) -> Result<Option<(String, String)>> {
    let range = conn
        .query_row(
            &format!("SELECT min(Started_Date), max(Started_Date) FROM {TABLE} WHERE Started_Date <> ''"),
            [],
            |r| Ok((r.get::<_, Option<String>>(0)?, r.get::<_, Option<String>>(1)?)),
        )
        .optional()?;
    Ok(match range {
        Some((Some(first), Some(last))) => Some((first, last)),
        _ => None,
    })
}

/// Rows in insertion order; with `limit`, only the most recent ones.
pub fn fetch_transactions(conn: &Connection, limit: Option<usize>) -> Result<Vec<Transaction>> {
    let sql = match limit {
        Some(n) => format!(
            "SELECT * FROM (SELECT * FROM {TABLE} ORDER BY TransactionID DESC LIMIT {n}) ORDER BY TransactionID"
        ),
        None => format!("SELECT * FROM {TABLE} ORDER BY TransactionID"),
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Transaction {
                id: row.get("TransactionID")?,
                kind: row.get("Type")?,
                product: row.get("Product")?,
                started_date: row.get("Started_Date")?,
                completed_date: row.get("Completed_Date")?,
                description: row.get("Description")?,
                amount: row.get("Amount")?,
                fee: row.get("Fee")?,
                currency: row.get("Currency")?,
                state: row.get("State")?,
                balance: row.get("Balance")?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Copies the whole database next to itself as `<db>.<stamp>.bak`.
pub fn snapshot(conn: &Connection, db_path: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let mut name = db_path.as_os_str().to_owned();
    name.push(format!(".{stamp}.bak"));
    let dest_path = PathBuf::from(name);

    let mut dest_conn = Connection::open(&dest_path)?;
    let backup = Backup::new(conn, &mut dest_conn)?;
    backup.run_to_completion(100, std::time::Duration::from_millis(10), None)?;
    Ok(dest_path)
}
