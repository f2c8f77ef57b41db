use anyhow::{Context, Result};

pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // NeoWs
    pub nasa_api_key: String,
    pub feed_url: String,

    // Paging
    pub window_days: u64,

    // Auth (stands in for the provider's persisted session)
    pub user_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let window_days = match get("FEED_WINDOW_DAYS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("FEED_WINDOW_DAYS must be a whole number, got {raw:?}"))?,
            None => DEFAULT_WINDOW_DAYS,
        };

        Ok(Self {
            nasa_api_key: get("NASA_API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            feed_url: get("NEOWS_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            window_days,
            user_email: get("COSMIC_USER_EMAIL").map(|v| v.trim().to_string()),
        })
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  NASA_API_KEY: {}", preview(&self.nasa_api_key));
        tracing::info!("  NEOWS_FEED_URL: {}", self.feed_url);
        tracing::info!("  FEED_WINDOW_DAYS: {}", self.window_days);
        tracing::info!(
            "  COSMIC_USER_EMAIL: {}",
            if self.user_email.is_some() { "<set>" } else { "<not set>" }
        );
    }
}

/// First five characters of a secret plus its length in characters.
fn preview(val: &str) -> String {
    let n = val.chars().take(5).map(char::len_utf8).sum();
    format!("{}...({} chars)", &val[..n], val.chars().count())
}
