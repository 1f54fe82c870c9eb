pub mod check;
pub mod import;
pub mod init;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::{default_settings_path, load_settings, shellexpand_path, Settings};

#[derive(Parser, Debug)]
#[command(name = "stmtload", about = "Load a transaction statement export into a SQLite table.")]
pub struct Cli {
    /// Settings file (default: ~/.config/stmtload/settings.json)
    #[arg(long, global = true, env = "STMTLOAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging verbosity: off, error, warn, info, debug, trace.
    /// Overrides the settings file; RUST_LOG overrides both.
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_settings_path)
    }

    pub fn settings(&self) -> Settings {
        load_settings(&self.settings_path())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace the Transactions table with the rows of a CSV statement.
    Import {
        /// Path to the CSV statement export
        file: PathBuf,
        /// SQLite database to load into (default: from settings)
        #[arg(long)]
        db: Option<String>,
        /// Insert rows without validating them first
        #[arg(long = "no-validate")]
        no_validate: bool,
        /// Save a copy of the database before the old table is dropped
        #[arg(long)]
        backup: bool,
    },
    /// Validate a CSV statement without touching any database.
    Check {
        /// Path to the CSV statement export
        file: PathBuf,
    },
    /// Show the database and what the last import left in it.
    Status {
        /// SQLite database to inspect (default: from settings)
        #[arg(long)]
        db: Option<String>,
    },
    /// Write the settings file.
    Init {
        /// Default database path
        #[arg(long)]
        db: Option<String>,
        /// Validate rows on import by default
        #[arg(long)]
        validate: Option<bool>,
    },
}

/// A `--db` argument if given, otherwise the configured database.
pub(crate) fn resolve_db(db: Option<&str>, settings: &Settings) -> PathBuf {
    shellexpand_path(db.unwrap_or(&settings.db_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_flags() {
        let cli = Cli::try_parse_from([
            "stmtload", "import", "stmt.csv", "--db", "/tmp/f.db", "--no-validate", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Import { file, db, no_validate, backup } => {
                assert_eq!(file, PathBuf::from("stmt.csv"));
                assert_eq!(db.as_deref(), Some("/tmp/f.db"));
                assert!(no_validate);
                assert!(!backup);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_resolve_db_prefers_argument() {
        let settings = Settings { db_path: "/data/default.db".into(), ..Settings::default() };
        assert_eq!(resolve_db(Some("/tmp/x.db"), &settings), PathBuf::from("/tmp/x.db"));
        assert_eq!(resolve_db(None, &settings), PathBuf::from("/data/default.db"));
    }
}
