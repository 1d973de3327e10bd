//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `journali_core` linkage and database bootstrap from a shell.
//! - Keep output deterministic for quick local sanity checks.

use journali_core::{EntryStore, JournalConfig, SqliteEntryRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("journali_core ping={}", journali_core::ping());
    println!("journali_core version={}", journali_core::core_version());

    match probe_store() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("journali probe failed: {message}");
            ExitCode::FAILURE
        }
    }
}

fn probe_store() -> Result<(), String> {
    let config = JournalConfig::from_env().map_err(|err| err.to_string())?;
    let logging_enabled = config.init_logging()?;
    println!("journali db_path={}", config.db_path.display());
    println!("journali logging={logging_enabled} level={}", config.log_level);

    let conn = config.open_db().map_err(|err| err.to_string())?;
    let repo = SqliteEntryRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let store = EntryStore::open(repo);
    let bookmarked = store
        .entries()
        .iter()
        .filter(|entry| entry.is_bookmarked)
        .count();
    println!("journali entries={} bookmarked={}", store.len(), bookmarked);
    Ok(())
}
