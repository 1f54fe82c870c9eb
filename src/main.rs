use std::process::ExitCode;

use clap::Parser;
use stmtload::cli::{self, Cli, Commands};
use stmtload::{logging, ErrorKind, ImportError};
use tracing::{debug, error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = cli.settings();

    let level = logging::parse_level(cli.log_level.as_deref().unwrap_or(&settings.log_level));
    logging::init(level);
    debug!(settings = %cli.settings_path().display(), "Log level set to {level}");

    let result = match &cli.command {
        Commands::Import {
            file,
            db,
            no_validate,
            backup,
        } => cli::import::run(file, db.as_deref(), *no_validate, *backup, &settings).map(|()| true),
        Commands::Check { file } => cli::check::run(file),
        Commands::Status { db } => cli::status::run(db.as_deref(), &settings).map(|()| true),
        Commands::Init { db, validate } => cli::init::run(
            &cli.settings_path(),
            db.as_deref(),
            *validate,
            cli.log_level.as_deref(),
        )
        .map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &ImportError) {
    let kind = e.kind();
    let what = match kind {
        ErrorKind::Storage => "Database error occurred",
        ErrorKind::Parse => "CSV reading error occurred",
        ErrorKind::Unexpected => "An unexpected error occurred",
    };
    error!(%kind, "{what}: {e}");
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        error!(%kind, "caused by: {cause}");
        source = cause.source();
    }
}
