use std::path::Path;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(settings_path: &Path, db: Option<&str>, validate: Option<bool>, log_level: Option<&str>) -> Result<()> {
    let mut settings = load_settings(settings_path);

    if let Some(db) = db {
        settings.db_path = shellexpand_path(db).to_string_lossy().to_string();
    }
    if let Some(validate) = validate {
        settings.validate = validate;
    }
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }

    save_settings(&settings, settings_path)?;

    println!("Settings written to {}", settings_path.display());
    println!("Database:   {}", settings.db_path);
    println!("Validate:   {}", settings.validate);
    println!("Log level:  {}", settings.log_level);
    Ok(())
}
