use clap::Parser;
use hazard_watch::SortKey;

#[derive(Debug, Parser)]
#[command(name = "hazard-watch", version, about = "Hazard monitoring dashboard")]
pub struct CliArgs {
    /// Run one poll cycle, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the hazard API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the refresh interval
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Sort order for the headless incident list (time, type, location)
    #[arg(long, value_name = "KEY", value_parser = parse_sort_key, default_value = "time")]
    pub sort: SortKey,
}

fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    SortKey::parse(value).ok_or_else(|| format!("unknown sort key {value:?}"))
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("HAZARD_API_URL", url);
        }
        if let Some(secs) = self.interval {
            std::env::set_var("REFRESH_INTERVAL_SECS", secs.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
