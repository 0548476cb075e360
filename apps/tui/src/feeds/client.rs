use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

const USER_AGENT: &str = concat!("hazard-watch/", env!("CARGO_PKG_VERSION"));

/// One endpoint of the hazard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Wind,
    Caer,
    Dispatch,
    Facilities,
    WeatherAlerts,
    Emissions,
    RadioFeeds,
}

impl Endpoint {
    pub const ALL: [Self; 7] = [
        Self::Wind,
        Self::Caer,
        Self::Dispatch,
        Self::Facilities,
        Self::WeatherAlerts,
        Self::Emissions,
        Self::RadioFeeds,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Wind => "/wind",
            Self::Caer => "/caer",
            Self::Dispatch => "/dispatch",
            Self::Facilities => "/facilities",
            Self::WeatherAlerts => "/weather-alerts",
            Self::Emissions => "/tceq-emissions",
            Self::RadioFeeds => "/radio-feeds",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Wind => "wind",
            Self::Caer => "caer",
            Self::Dispatch => "dispatch",
            Self::Facilities => "facilities",
            Self::WeatherAlerts => "weather-alerts",
            Self::Emissions => "tceq-emissions",
            Self::RadioFeeds => "radio-feeds",
        }
    }

    /// Fixed text a panel shows once its feed has failed.
    pub const fn unavailable_text(self) -> &'static str {
        match self {
            Self::Wind => "METEOROLOGICAL DATA UNAVAILABLE",
            Self::Caer => "CAER FEED UNAVAILABLE",
            Self::Dispatch => "DISPATCH FEED UNAVAILABLE",
            Self::Facilities => "FACILITY DIRECTORY UNAVAILABLE",
            Self::WeatherAlerts => "WEATHER ALERTS UNAVAILABLE",
            Self::Emissions => "EMISSION EVENTS UNAVAILABLE",
            Self::RadioFeeds => "RADIO DIRECTORY UNAVAILABLE",
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    /// The API answered but reported a failure in its `error` field.
    #[error("{0}")]
    Payload(String),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where feed payloads come from. The HTTP client in production, a canned
/// source in tests.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn get_json(&self, endpoint: Endpoint) -> Result<Value, FeedError>;
}

#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFeedSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn get_json(&self, endpoint: Endpoint) -> Result<Value, FeedError> {
        let url = self.url_for(endpoint);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        check_payload(status, &body)
    }
}

/// Turns a raw response into a payload or a feed failure. A top-level `error`
/// field fails the feed even on a 2xx status, and a non-2xx status fails it
/// even when the body parses.
pub fn check_payload(status: u16, body: &str) -> Result<Value, FeedError> {
    let success = (200..300).contains(&status);

    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) if !success => return Err(FeedError::Status(status)),
        Err(err) => return Err(err.into()),
    };

    if let Some(message) = payload_error(&value) {
        return Err(FeedError::Payload(message));
    }

    if !success {
        return Err(FeedError::Status(status));
    }

    Ok(value)
}

fn payload_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FeedError> {
    serde_json::from_value(value).map_err(Into::into)
}

/// Fetches and decodes one endpoint, logging the failure if there is one.
pub async fn fetch<T: DeserializeOwned>(
    source: &dyn FeedSource,
    endpoint: Endpoint,
) -> Result<T, FeedError> {
    let result = match source.get_json(endpoint).await {
        Ok(value) => decode(value),
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        log::warn!("{} feed unavailable: {err}", endpoint.label());
    }

    result
}
