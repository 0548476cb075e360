pub mod client;
pub mod models;

pub use client::{check_payload, fetch, Endpoint, FeedError, FeedSource, HttpFeedSource};
pub use models::{
    CaerBoard, CaerMessage, DispatchPayload, EmissionEvent, EmissionsPayload, FacilityDirectory,
    FacilityRecord, RadioDirectoryPayload, RadioFeed, Severity, WeatherAlert, WeatherAlertsPayload,
    WindState,
};
