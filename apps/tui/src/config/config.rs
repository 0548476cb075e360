use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use log::LevelFilter;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://texmexdex-local-emergency-alerts.hf.space/api";
pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Runtime settings resolved from `.env` and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("HAZARD_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let refresh_interval = seconds(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_SECS)?;
        let request_timeout = seconds(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        let debug = lookup("DEBUG").is_some_and(|value| {
            matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        });

        Ok(Self {
            api_base_url,
            refresh_interval,
            request_timeout,
            debug,
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(Duration::from_secs(default));
    };

    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| eyre!("{key} must be a whole number of seconds, got {raw:?}: {e}"))?;

    if secs == 0 {
        return Err(eyre!("{key} must be at least 1 second"));
    }

    Ok(Duration::from_secs(secs))
}

/// Initializes the application configuration
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}

/// Level used when neither `--debug` nor `RUST_LOG` is set. The TUI owns the
/// screen, so it logs nothing.
pub const fn default_log_level(interactive: bool) -> LevelFilter {
    if interactive {
        LevelFilter::Off
    } else {
        LevelFilter::Info
    }
}

pub fn init_logging(interactive: bool, debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_log_level(interactive));

    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.try_init().ok();
}
