use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: akkordy.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "akkordy.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Directory for downloaded voice/audio clips while they are being recognized
/// Read from TEMP_FILES_DIR environment variable, defaults to the system temp dir
pub static TEMP_FILES_DIR: Lazy<String> = Lazy::new(|| {
    env::var("TEMP_FILES_DIR").unwrap_or_else(|_| env::temp_dir().to_string_lossy().into_owned())
});

/// AudD API token for audio recognition
pub static AUDD_API_TOKEN: Lazy<Option<String>> = Lazy::new(|| non_empty_env("AUDD_API_TOKEN"));

/// Mistral API key for performance tips
/// Without it the bot still sends chord sheets, tips degrade to an apology line
pub static MISTRAL_API_KEY: Lazy<Option<String>> = Lazy::new(|| non_empty_env("MISTRAL_API_KEY"));

/// Mistral model used for tips
pub static MISTRAL_MODEL: Lazy<String> =
    Lazy::new(|| non_empty_env("MISTRAL_MODEL").unwrap_or_else(|| "mistral-large-2411".to_string()));

/// Mistral API host
pub static MISTRAL_BASE_URL: Lazy<String> =
    Lazy::new(|| non_empty_env("MISTRAL_BASE_URL").unwrap_or_else(|| "https://api.mistral.ai".to_string()));

/// AudD recognition endpoint
pub static AUDD_BASE_URL: Lazy<String> =
    Lazy::new(|| non_empty_env("AUDD_BASE_URL").unwrap_or_else(|| "https://api.audd.io".to_string()));

/// Chord catalog (amdm.ru or one of its mirrors)
pub static CATALOG_BASE_URL: Lazy<String> =
    Lazy::new(|| non_empty_env("CATALOG_BASE_URL").unwrap_or_else(|| "https://amdm.ru".to_string()));

/// Translation endpoint host
pub static TRANSLATE_BASE_URL: Lazy<String> = Lazy::new(|| {
    non_empty_env("TRANSLATE_BASE_URL").unwrap_or_else(|| "https://translate.googleapis.com".to_string())
});

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for catalog and translation requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Recognition uploads whole clips, give it more room
    pub const RECOGNITION_TIMEOUT_SECS: u64 = 60;

    /// Tip generation on a large model can be slow
    pub const TIPS_TIMEOUT_SECS: u64 = 90;

    /// Telegram Bot API timeout (in seconds)
    pub const TELEGRAM_TIMEOUT_SECS: u64 = 120;

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    pub fn recognition_timeout() -> Duration {
        Duration::from_secs(RECOGNITION_TIMEOUT_SECS)
    }

    pub fn tips_timeout() -> Duration {
        Duration::from_secs(TIPS_TIMEOUT_SECS)
    }

    pub fn telegram_timeout() -> Duration {
        Duration::from_secs(TELEGRAM_TIMEOUT_SECS)
    }
}

/// Catalog browsing configuration
pub mod catalog {
    use super::Duration;

    /// Minimum pause before each catalog request (in milliseconds)
    pub const PACING_MIN_MS: u64 = 2000;

    /// Maximum pause before each catalog request (in milliseconds)
    pub const PACING_MAX_MS: u64 = 5000;

    pub fn pacing_range() -> (Duration, Duration) {
        (Duration::from_millis(PACING_MIN_MS), Duration::from_millis(PACING_MAX_MS))
    }
}

/// Telegram message limits
pub mod telegram {
    /// Hard limit for a single text message
    pub const MAX_MESSAGE_LEN: usize = 4096;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacing_range_is_ordered() {
        let (min, max) = catalog::pacing_range();
        assert!(min <= max);
    }

    #[test]
    fn test_non_empty_env_ignores_blank_values() {
        assert_eq!(non_empty_env("AKKORDY_SURELY_UNSET_VARIABLE"), None);
    }
}
