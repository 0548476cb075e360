use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown in place of any field a record does not carry.
pub const PLACEHOLDER: &str = "--";

// Alias keys in lookup order; the first present, non-empty one wins.
const TIME_KEYS: &[&str] = &[
    "Call Time",
    "Time",
    "Call DateTime",
    "Incident Time",
    "Call Time(Opened)",
];
const AGENCY_KEYS: &[&str] = &["Agency"];
const TYPE_KEYS: &[&str] = &["Incident Type", "Type"];
const LOCATION_KEYS: &[&str] = &["Address", "Location", "Incident Location"];
const CROSS_STREET_KEYS: &[&str] = &["Cross Street"];
const KEY_MAP_KEYS: &[&str] = &["Key Map"];
const COMBINED_RESPONSE_KEYS: &[&str] = &["Combined Response"];

/// A dispatch record with its aliased fields resolved at ingestion.
///
/// Never mutated once it is in an incident sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct IncidentRecord {
    pub time: Option<String>,
    pub agency: Option<String>,
    pub incident_type: Option<String>,
    pub location: Option<String>,
    pub cross_street: Option<String>,
    pub key_map: Option<String>,
    pub combined_response: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub has_location: bool,
}

/// Deduplication identity: exact (call time, address) match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IncidentKey {
    pub time: Option<String>,
    pub location: Option<String>,
}

impl IncidentRecord {
    pub fn from_json(value: &Value) -> Self {
        value.as_object().map_or_else(Self::default, Self::from_map)
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            time: resolve(map, TIME_KEYS),
            agency: resolve(map, AGENCY_KEYS),
            incident_type: resolve(map, TYPE_KEYS),
            location: resolve(map, LOCATION_KEYS),
            cross_street: resolve(map, CROSS_STREET_KEYS),
            key_map: resolve(map, KEY_MAP_KEYS),
            combined_response: resolve(map, COMBINED_RESPONSE_KEYS),
            lat: map.get("lat").and_then(number),
            lon: map.get("lon").and_then(number),
            has_location: map.get("has_location").is_some_and(truthy),
        }
    }

    pub fn key(&self) -> IncidentKey {
        IncidentKey {
            time: self.time.clone(),
            location: self.location.clone(),
        }
    }

    pub fn matches_key(&self, key: &IncidentKey) -> bool {
        self.time == key.time && self.location == key.location
    }

    pub fn time_text(&self) -> &str {
        self.time.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn agency_text(&self) -> &str {
        self.agency.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn type_text(&self) -> &str {
        self.incident_type.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Coordinates, but only when the feed vouches for them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if !self.has_location {
            return None;
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some((lat, lon)),
            _ => None,
        }
    }
}

impl From<Value> for IncidentRecord {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

fn resolve(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.get(*key).and_then(scalar_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    }
}
