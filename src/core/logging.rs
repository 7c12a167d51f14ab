//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of which collaborators are configured

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs which external services are configured at application startup
///
/// Recognition without a token and tips without a key both still "work":
/// recognition reports every clip as unrecognized, tips degrade to an apology.
pub fn log_services_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🎸 Services Configuration Check");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::AUDD_API_TOKEN.is_some() {
        log::info!("✅ AUDD_API_TOKEN: set");
    } else {
        log::error!("❌ AUDD_API_TOKEN: not set, songs will NOT be recognized!");
    }

    if config::MISTRAL_API_KEY.is_some() {
        log::info!("✅ MISTRAL_API_KEY: set (model {})", config::MISTRAL_MODEL.as_str());
    } else {
        log::warn!("⚠️  MISTRAL_API_KEY: not set, performance tips are disabled");
    }

    log::info!("   Catalog: {}", config::CATALOG_BASE_URL.as_str());
    log::info!("   Translation: {}", config::TRANSLATE_BASE_URL.as_str());
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("akkordy.log");
        assert!(!path.exists());

        // the file is created before the global logger is installed, so a
        // second init in the same process still leaves it behind
        let _ = init_logger(path.to_str().unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_init_logger_rejects_missing_directory() {
        let result = init_logger("/nonexistent-dir-for-akkordy/log.txt");
        assert!(result.is_err());
    }
}
