use crate::feeds::{
    fetch, CaerBoard, DispatchPayload, EmissionsPayload, Endpoint, FacilityDirectory,
    FacilityRecord, FeedError, FeedSource, RadioDirectoryPayload, RadioFeed, WeatherAlertsPayload,
    WindState,
};

/// Which load-once feeds a cycle should also fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticFeeds {
    pub facilities: bool,
    pub radio_directory: bool,
}

impl StaticFeeds {
    pub const ALL: Self = Self {
        facilities: true,
        radio_directory: true,
    };
    pub const NONE: Self = Self {
        facilities: false,
        radio_directory: false,
    };
}

/// Everything one poll cycle brought back, one independent result per feed.
/// Static feeds are `None` when the cycle skipped them.
#[derive(Debug)]
pub struct PollOutcome {
    pub wind: Result<WindState, FeedError>,
    pub caer: Result<CaerBoard, FeedError>,
    pub dispatch: Result<DispatchPayload, FeedError>,
    pub weather_alerts: Result<WeatherAlertsPayload, FeedError>,
    pub emissions: Result<EmissionsPayload, FeedError>,
    pub facilities: Option<Result<Vec<FacilityRecord>, FeedError>>,
    pub radio_feeds: Option<Result<Vec<RadioFeed>, FeedError>>,
}

impl PollOutcome {
    pub fn failures(&self) -> Vec<Endpoint> {
        let mut failed = Vec::new();
        if self.wind.is_err() {
            failed.push(Endpoint::Wind);
        }
        if self.caer.is_err() {
            failed.push(Endpoint::Caer);
        }
        if self.dispatch.is_err() {
            failed.push(Endpoint::Dispatch);
        }
        if self.weather_alerts.is_err() {
            failed.push(Endpoint::WeatherAlerts);
        }
        if self.emissions.is_err() {
            failed.push(Endpoint::Emissions);
        }
        if matches!(self.facilities, Some(Err(_))) {
            failed.push(Endpoint::Facilities);
        }
        if matches!(self.radio_feeds, Some(Err(_))) {
            failed.push(Endpoint::RadioFeeds);
        }
        failed
    }
}

/// Runs every fetcher at once and waits for all of them. A failing feed only
/// produces an `Err` in its own slot.
pub async fn fetch_cycle(source: &dyn FeedSource, statics: StaticFeeds) -> PollOutcome {
    let facilities = async {
        if !statics.facilities {
            return None;
        }
        let directory = fetch::<FacilityDirectory>(source, Endpoint::Facilities).await;
        Some(directory.map(FacilityDirectory::into_records))
    };

    let radio_feeds = async {
        if !statics.radio_directory {
            return None;
        }
        let directory = fetch::<RadioDirectoryPayload>(source, Endpoint::RadioFeeds).await;
        Some(directory.map(|payload| payload.feeds))
    };

    let (wind, caer, dispatch, weather_alerts, emissions, facilities, radio_feeds) = tokio::join!(
        fetch::<WindState>(source, Endpoint::Wind),
        fetch::<CaerBoard>(source, Endpoint::Caer),
        fetch::<DispatchPayload>(source, Endpoint::Dispatch),
        fetch::<WeatherAlertsPayload>(source, Endpoint::WeatherAlerts),
        fetch::<EmissionsPayload>(source, Endpoint::Emissions),
        facilities,
        radio_feeds,
    );

    PollOutcome {
        wind,
        caer,
        dispatch,
        weather_alerts,
        emissions,
        facilities,
        radio_feeds,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves canned bodies through the same payload checks as the HTTP client.
    pub struct CannedSource {
        bodies: HashMap<Endpoint, (u16, Value)>,
    }

    impl CannedSource {
        pub fn healthy() -> Self {
            let mut bodies = HashMap::new();
            bodies.insert(
                Endpoint::Wind,
                (
                    200,
                    json!({"direction": "NE", "speed": "12 mph", "temperature": 81, "is_risk": true}),
                ),
            );
            bodies.insert(
                Endpoint::Caer,
                (
                    200,
                    json!({"messages": [{"title": "Flaring", "body": "Unit 4", "severity": "warning"}], "count": 1}),
                ),
            );
            bodies.insert(
                Endpoint::Dispatch,
                (
                    200,
                    json!({
                        "incidents": [
                            {"Call Time": "10:01", "Address": "1 Channelview Dr", "Agency": "FD",
                             "Incident Type": "Structure Fire", "lat": 29.81, "lon": -95.11, "has_location": true}
                        ],
                        "all_incidents": [
                            {"Call Time": "10:01", "Address": "1 Channelview Dr", "Agency": "FD",
                             "Incident Type": "Structure Fire", "lat": 29.81, "lon": -95.11, "has_location": true},
                            {"Call Time": "10:03", "Address": "9 Main St", "Agency": "PD",
                             "Incident Type": "Traffic"}
                        ],
                        "priority_count": 1,
                        "total_incidents": 2
                    }),
                ),
            );
            bodies.insert(
                Endpoint::Facilities,
                (
                    200,
                    json!({"Shell Deer Park": {"lat": 29.67, "lon": -95.128, "type": "refinery"}}),
                ),
            );
            bodies.insert(
                Endpoint::WeatherAlerts,
                (200, json!({"alerts": [{"event": "Heat Advisory", "severity": "Moderate"}]})),
            );
            bodies.insert(
                Endpoint::Emissions,
                (200, json!({"events": [{"facility": "Plant A", "type": "Upset"}]})),
            );
            bodies.insert(
                Endpoint::RadioFeeds,
                (
                    200,
                    json!({"feeds": [{"id": 30735, "name": "Houston FD", "coverage": "Houston", "url": "", "embed_url": ""}]}),
                ),
            );
            Self { bodies }
        }

        pub fn with(mut self, endpoint: Endpoint, status: u16, body: Value) -> Self {
            self.bodies.insert(endpoint, (status, body));
            self
        }
    }

    #[async_trait]
    impl FeedSource for CannedSource {
        async fn get_json(&self, endpoint: Endpoint) -> Result<Value, FeedError> {
            let (status, body) = self
                .bodies
                .get(&endpoint)
                .cloned()
                .unwrap_or((404, Value::Null));
            crate::feeds::check_payload(status, &body.to_string())
        }
    }

    #[tokio::test]
    async fn healthy_cycle_fills_every_slot() {
        let source = CannedSource::healthy();
        let outcome = fetch_cycle(&source, StaticFeeds::ALL).await;

        assert!(outcome.failures().is_empty());
        assert!(matches!(&outcome.wind, Ok(wind) if wind.direction == "NE"));
        assert!(matches!(&outcome.facilities, Some(Ok(list)) if list.len() == 1));
    }

    #[tokio::test]
    async fn error_field_fails_only_its_own_feed() {
        let source = CannedSource::healthy().with(Endpoint::Wind, 200, json!({"error": "timeout"}));
        let outcome = fetch_cycle(&source, StaticFeeds::NONE).await;

        assert!(matches!(&outcome.wind, Err(FeedError::Payload(m)) if m == "timeout"));
        assert!(outcome.caer.is_ok());
        assert!(outcome.dispatch.is_ok());
        assert!(outcome.weather_alerts.is_ok());
        assert!(outcome.emissions.is_ok());
        assert_eq!(outcome.failures(), vec![Endpoint::Wind]);
    }

    #[tokio::test]
    async fn skipped_static_feeds_are_none() {
        let source = CannedSource::healthy().with(Endpoint::Facilities, 500, json!({}));
        let outcome = fetch_cycle(&source, StaticFeeds::NONE).await;

        assert!(outcome.facilities.is_none());
        assert!(outcome.radio_feeds.is_none());

        let outcome = fetch_cycle(&source, StaticFeeds::ALL).await;
        assert!(matches!(outcome.facilities, Some(Err(FeedError::Status(500)))));
        assert!(matches!(outcome.radio_feeds, Some(Ok(_))));
    }

    #[tokio::test]
    async fn every_feed_can_fail_at_once() {
        let mut source = CannedSource::healthy();
        for endpoint in Endpoint::ALL {
            source = source.with(endpoint, 503, json!({"error": "upstream down"}));
        }
        let outcome = fetch_cycle(&source, StaticFeeds::ALL).await;
        assert_eq!(outcome.failures().len(), Endpoint::ALL.len());
    }
}
