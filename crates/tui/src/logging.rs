use std::{fs::OpenOptions, sync::Mutex};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

pub fn filter_directives(level: &str) -> String {
    format!("pocketbook_tui={level},api_types={level}")
}

/// Logs go to `log_file`: the terminal belongs to the UI.
pub fn init(settings: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_directives(&settings.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
