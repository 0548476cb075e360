//! Dashboard state fed by poll cycles.

use chrono::{DateTime, Local};

use crate::feeds::{
    CaerBoard, EmissionEvent, Endpoint, FacilityRecord, FeedError, WeatherAlert, WindState,
};
use crate::geo::{plume_layer, PlumePolygon};
use crate::incidents::{
    incident_markers, table::render_view, IncidentKey, IncidentMarker, IncidentRow, IncidentStore,
    TableView,
};
use crate::poll::{PollOutcome, StaticFeeds};
use crate::radio::RadioState;

/// One panel's view of its feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPanel<T> {
    Loading,
    Ready(T),
    Unavailable {
        detail: Option<String>,
    },
}

impl<T> FeedPanel<T> {
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Counts shown in the dispatch panel header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    pub priority_count: usize,
    pub total_incidents: usize,
    pub added_priority: usize,
    pub added_full: usize,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub incidents: IncidentStore,
    pub table: TableView,
    pub show_plumes: bool,
    pub wind: FeedPanel<WindState>,
    pub caer: FeedPanel<CaerBoard>,
    pub dispatch: FeedPanel<DispatchSummary>,
    pub weather_alerts: FeedPanel<Vec<WeatherAlert>>,
    pub emissions: FeedPanel<Vec<EmissionEvent>>,
    pub facilities: Vec<FacilityRecord>,
    pub facilities_loaded: bool,
    pub radio: RadioState,
    pub highlighted: Option<IncidentKey>,
    pub last_refreshed: Option<DateTime<Local>>,
    pub cycles: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            incidents: IncidentStore::new(),
            table: TableView::default(),
            show_plumes: true,
            wind: FeedPanel::Loading,
            caer: FeedPanel::Loading,
            dispatch: FeedPanel::Loading,
            weather_alerts: FeedPanel::Loading,
            emissions: FeedPanel::Loading,
            facilities: Vec::new(),
            facilities_loaded: false,
            radio: RadioState::default(),
            highlighted: None,
            last_refreshed: None,
            cycles: 0,
        }
    }

    /// Folds one poll cycle in. Each feed updates only its own panel; the
    /// refresh stamp moves even when every feed failed.
    pub fn apply(&mut self, outcome: PollOutcome, at: DateTime<Local>) {
        self.cycles += 1;

        self.wind = panel(outcome.wind, Endpoint::Wind);
        self.caer = panel(outcome.caer, Endpoint::Caer);
        self.weather_alerts = panel(
            outcome.weather_alerts.map(|payload| payload.alerts),
            Endpoint::WeatherAlerts,
        );
        self.emissions = panel(
            outcome.emissions.map(|payload| payload.events),
            Endpoint::Emissions,
        );

        self.dispatch = match outcome.dispatch {
            Ok(payload) => {
                let total = payload
                    .total_incidents
                    .or_else(|| payload.all_incidents.as_ref().map(Vec::len))
                    .unwrap_or(payload.incidents.len());
                let priority_count = payload.priority_count.unwrap_or(payload.incidents.len());
                let (added_priority, added_full) = self
                    .incidents
                    .ingest(payload.incidents, payload.all_incidents);
                log::debug!("dispatch merged {added_priority} priority / {added_full} full");
                FeedPanel::Ready(DispatchSummary {
                    priority_count,
                    total_incidents: total,
                    added_priority,
                    added_full,
                })
            }
            Err(err) => {
                log::debug!("dispatch panel unavailable: {err}");
                FeedPanel::Unavailable {
                    detail: Some(err.to_string()),
                }
            }
        };

        match outcome.facilities {
            Some(Ok(facilities)) => {
                self.facilities = facilities;
                self.facilities_loaded = true;
            }
            Some(Err(err)) => log::debug!("facilities still missing: {err}"),
            None => {}
        }

        match outcome.radio_feeds {
            Some(Ok(feeds)) => self.radio.load(feeds),
            Some(Err(err)) => log::debug!("radio directory still missing: {err}"),
            None => {}
        }

        self.last_refreshed = Some(at);
    }

    /// Load-once feeds that have not arrived yet.
    pub fn static_feeds_needed(&self) -> StaticFeeds {
        StaticFeeds {
            facilities: !self.facilities_loaded,
            radio_directory: self.radio.feeds.is_empty(),
        }
    }

    pub fn visible_rows(&self) -> Vec<IncidentRow<'_>> {
        render_view(self.incidents.sequence(self.table.scope()), &self.table)
    }

    pub fn visible_markers(&self) -> Vec<IncidentMarker> {
        incident_markers(&self.visible_rows())
    }

    pub fn plumes(&self) -> Vec<PlumePolygon> {
        plume_layer(&self.facilities, self.wind.ready(), self.show_plumes)
    }

    /// Highlights the incident with `key` in the current scope and lets the
    /// radio follow it. Returns the channel name when the radio retuned.
    pub fn highlight(&mut self, key: &IncidentKey) -> Option<String> {
        let record = self
            .incidents
            .sequence(self.table.scope())
            .find(key)?
            .clone();
        self.highlighted = Some(key.clone());
        self.radio
            .on_incident_highlighted(&record)
            .map(|feed| feed.name.clone())
    }

    pub fn last_refreshed_label(&self) -> String {
        self.last_refreshed.map_or_else(
            || "LAST UPDATE: --:--:--".to_string(),
            |at| format!("LAST UPDATE: {}", at.format("%H:%M:%S")),
        )
    }
}

fn panel<T>(result: Result<T, FeedError>, endpoint: Endpoint) -> FeedPanel<T> {
    match result {
        Ok(value) => FeedPanel::Ready(value),
        Err(err) => {
            log::debug!("{} panel unavailable: {err}", endpoint.label());
            FeedPanel::Unavailable { detail: None }
        }
    }
}
