//! Payload shapes returned by the hazard API.
//!
//! The API is scraped from several upstream sites, so most fields are
//! optional and numeric values sometimes arrive as strings. Records are
//! tolerated rather than rejected when fields are missing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::incidents::IncidentRecord;

/// Current wind reading. Only the latest one is kept.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindState {
    /// Compass label the wind blows *from*, e.g. `"NNE"`.
    #[serde(default, deserialize_with = "display_text")]
    pub direction: String,
    #[serde(default, deserialize_with = "display_text")]
    pub speed: String,
    #[serde(default, deserialize_with = "display_text")]
    pub temperature: String,
    #[serde(default, rename = "is_risk")]
    pub risk: bool,
    #[serde(default)]
    pub forecast: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map_or(Self::Info, Self::parse))
    }
}

/// A community notification from the CAER board.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CaerMessage {
    #[serde(default, deserialize_with = "display_text")]
    pub title: String,
    #[serde(default, deserialize_with = "display_text")]
    pub body: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CaerBoard {
    #[serde(default)]
    pub messages: Vec<CaerMessage>,
    #[serde(default)]
    pub count: Option<usize>,
}

impl CaerBoard {
    pub fn active_count(&self) -> usize {
        self.count.unwrap_or(self.messages.len())
    }
}

/// Body of `GET /dispatch`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DispatchPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub incidents: Vec<IncidentRecord>,
    #[serde(default)]
    pub all_incidents: Option<Vec<IncidentRecord>>,
    #[serde(default)]
    pub priority_count: Option<usize>,
    #[serde(default)]
    pub total_incidents: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityRecord {
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub category: String,
}

impl FacilityRecord {
    /// `(lat, lon)` when both coordinates are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct FacilityEntry {
    #[serde(default, deserialize_with = "coordinate")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    lon: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "display_text")]
    category: String,
}

/// `GET /facilities` returns an object keyed by facility name.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct FacilityDirectory(BTreeMap<String, FacilityEntry>);

impl FacilityDirectory {
    pub fn into_records(self) -> Vec<FacilityRecord> {
        self.0
            .into_iter()
            .map(|(name, entry)| FacilityRecord {
                name,
                lat: entry.lat,
                lon: entry.lon,
                category: entry.category,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WeatherAlert {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, alias = "areaDesc")]
    pub area: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct WeatherAlertsPayload {
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
}

/// A regulatory air-emission event report.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct EmissionEvent {
    #[serde(default, alias = "regulated_entity")]
    pub facility: Option<String>,
    #[serde(default, rename = "type", alias = "event_type")]
    pub event_type: Option<String>,
    #[serde(default, alias = "start_date")]
    pub start: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contaminants: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EmissionsPayload {
    #[serde(default)]
    pub events: Vec<EmissionEvent>,
}

/// A scanner feed in the radio directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RadioFeed {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coverage: String,
    /// External listen page.
    #[serde(default)]
    pub url: String,
    /// Embeddable player.
    #[serde(default)]
    pub embed_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RadioDirectoryPayload {
    #[serde(default)]
    pub feeds: Vec<RadioFeed>,
}

/// Accepts any JSON scalar and keeps its display form.
fn display_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Numbers or numeric strings; anything else reads as unknown.
fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
    .filter(|coord: &f64| coord.is_finite()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
