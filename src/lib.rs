//! Loads a personal transaction statement export (CSV) into the
//! `Transactions` table of a SQLite database, replacing whatever the table
//! held before.

pub mod cli;
pub mod db;
pub mod error;
pub mod fmt;
pub mod importer;
pub mod logging;
pub mod models;
pub mod settings;
pub mod validator;

pub use error::{ErrorKind, ImportError, Result};
pub use importer::{ImportObserver, ImportOptions, ImportSummary, Importer, TracingObserver};
