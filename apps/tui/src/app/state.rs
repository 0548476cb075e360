use chrono::Local;
use std::time::Instant;

use hazard_watch::config::AppConfig;
use hazard_watch::incidents::IncidentKey;
use hazard_watch::{DashboardState, PollOutcome};

/// Rows moved by PgUp/PgDn.
pub const PAGE_STEP: usize = 5;

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub dashboard: DashboardState,
    pub config: AppConfig,
    pub selected_row: usize,
    pub show_help: bool,
    pub filter_editing: bool,
    pub filter_input: String,
    pub status_message: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
    /// Cycles spawned but not yet folded in.
    pub in_flight: usize,
    pub refresh_requested: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            running: true,
            dashboard: DashboardState::new(),
            config,
            selected_row: 0,
            show_help: false,
            filter_editing: false,
            filter_input: String::new(),
            status_message: String::new(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
            in_flight: 0,
            refresh_requested: false,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    pub fn apply_outcome(&mut self, outcome: PollOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let failed = outcome.failures();
        let selected = self.selected_key();
        self.dashboard.apply(outcome, Local::now());
        self.reselect(selected);

        if failed.is_empty() {
            self.status_message.clear();
        } else {
            let names = failed
                .iter()
                .map(|endpoint| endpoint.label())
                .collect::<Vec<_>>()
                .join(", ");
            self.status_message = format!("Unavailable: {names}");
        }
    }

    pub fn row_count(&self) -> usize {
        self.dashboard.visible_rows().len()
    }

    pub fn selected_key(&self) -> Option<IncidentKey> {
        self.dashboard
            .visible_rows()
            .get(self.selected_row)
            .map(|row| row.record.key())
    }

    /// Keeps the cursor on the same incident after rows were inserted above it.
    fn reselect(&mut self, key: Option<IncidentKey>) {
        let index = key.and_then(|key| {
            self.dashboard
                .visible_rows()
                .iter()
                .position(|row| row.record.matches_key(&key))
        });

        match index {
            Some(index) => self.selected_row = index,
            None => self.clamp_selection(),
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.row_count();
        if self.selected_row >= rows {
            self.selected_row = rows.saturating_sub(1);
        }
    }

    pub fn select_up(&mut self, step: usize) {
        self.selected_row = self.selected_row.saturating_sub(step);
    }

    pub fn select_down(&mut self, step: usize) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected_row = (self.selected_row + step).min(rows - 1);
        }
    }

    pub const fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    /// Highlights the selected row on the map and lets the radio follow it.
    pub fn highlight_selected(&mut self) {
        let Some(key) = self.selected_key() else {
            return;
        };

        self.status_message = match self.dashboard.highlight(&key) {
            Some(channel) => format!("Radio switched to {channel}"),
            None => format!(
                "Highlighted {}",
                key.location.as_deref().unwrap_or(hazard_watch::incidents::PLACEHOLDER)
            ),
        };
    }

    pub fn cycle_sort(&mut self) {
        let table = &mut self.dashboard.table;
        table.sort_key = table.sort_key.next();
        self.status_message = format!("Sorted by {}", table.sort_key.label());
    }

    pub fn toggle_show_all_history(&mut self) {
        let table = &mut self.dashboard.table;
        table.show_all_history = !table.show_all_history;
        self.clamp_selection();
    }

    pub fn toggle_scope(&mut self) {
        let table = &mut self.dashboard.table;
        table.show_all_incidents = !table.show_all_incidents;
        self.status_message = format!("Showing {} incidents", table.scope().label());
        self.selected_row = 0;
    }

    pub fn toggle_plumes(&mut self) {
        self.dashboard.show_plumes = !self.dashboard.show_plumes;
    }

    pub fn radio_next(&mut self) {
        if let Some(feed) = self.dashboard.radio.select_next() {
            self.status_message = format!("Radio: {}", feed.name);
        }
    }

    pub fn radio_prev(&mut self) {
        if let Some(feed) = self.dashboard.radio.select_prev() {
            self.status_message = format!("Radio: {}", feed.name);
        }
    }

    pub fn toggle_auto_switch(&mut self) {
        let on = self.dashboard.radio.toggle_auto_switch();
        self.status_message = format!("Radio auto-switch {}", if on { "on" } else { "off" });
    }

    pub fn begin_filter(&mut self) {
        self.filter_editing = true;
        self.filter_input = self.dashboard.table.filter.clone();
    }

    pub fn apply_filter(&mut self) {
        self.dashboard.table.filter = self.filter_input.trim().to_string();
        self.filter_editing = false;
        self.selected_row = 0;
    }

    pub fn cancel_filter(&mut self) {
        self.filter_editing = false;
        self.filter_input.clear();
    }

    pub fn clear_filter(&mut self) {
        self.dashboard.table.filter.clear();
        self.filter_input.clear();
        self.clamp_selection();
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
        self.status_message = "Refreshing...".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard_watch::feeds::{DispatchPayload, FeedError};
    use hazard_watch::incidents::IncidentRecord;
    use hazard_watch::SortKey;

    fn record(time: &str, location: &str, kind: &str) -> IncidentRecord {
        IncidentRecord {
            time: Some(time.to_string()),
            location: Some(location.to_string()),
            incident_type: Some(kind.to_string()),
            ..IncidentRecord::default()
        }
    }

    fn app_with_incidents() -> App {
        let mut app = App::new(AppConfig::default());
        app.dashboard.incidents.ingest(
            vec![
                record("08:00", "1 Oak St", "Alarm"),
                record("09:00", "2 Elm St", "Fire"),
                record("10:00", "3 Ash St", "Medical"),
            ],
            None,
        );
        app
    }

    #[test]
    fn selection_is_clamped_to_rows() {
        let mut app = app_with_incidents();
        app.select_down(PAGE_STEP);
        assert_eq!(app.selected_row, 2);
        app.select_up(1);
        assert_eq!(app.selected_row, 1);
        app.select_up(PAGE_STEP);
        assert_eq!(app.selected_row, 0);
        app.select_last();
        assert_eq!(app.selected_row, 2);
    }

    #[test]
    fn filter_narrows_rows_and_resets_selection() {
        let mut app = app_with_incidents();
        app.select_last();
        app.begin_filter();
        app.filter_input = "elm".to_string();
        app.apply_filter();

        assert_eq!(app.row_count(), 1);
        assert_eq!(app.selected_row, 0);
        assert_eq!(
            app.selected_key().and_then(|key| key.location),
            Some("2 Elm St".to_string())
        );

        app.clear_filter();
        assert_eq!(app.row_count(), 3);
    }

    #[test]
    fn sort_cycles_through_keys() {
        let mut app = app_with_incidents();
        assert_eq!(app.dashboard.table.sort_key, SortKey::Time);
        app.cycle_sort();
        assert_eq!(app.dashboard.table.sort_key, SortKey::Type);
        // newest first under time sort, alphabetical under type sort
        assert_eq!(
            app.selected_key().and_then(|key| key.location),
            Some("1 Oak St".to_string())
        );
    }

    #[test]
    fn highlight_without_rows_is_a_no_op() {
        let mut app = App::new(AppConfig::default());
        app.highlight_selected();
        assert!(app.dashboard.highlighted.is_none());
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn highlight_marks_selected_row() {
        let mut app = app_with_incidents();
        app.highlight_selected();
        assert_eq!(
            app.dashboard.highlighted.as_ref().and_then(|key| key.time.as_deref()),
            Some("10:00")
        );
    }

    fn dispatch_only(incidents: Vec<IncidentRecord>) -> PollOutcome {
        PollOutcome {
            wind: Err(FeedError::Status(503)),
            caer: Err(FeedError::Status(503)),
            dispatch: Ok(DispatchPayload {
                incidents,
                ..DispatchPayload::default()
            }),
            weather_alerts: Err(FeedError::Status(503)),
            emissions: Err(FeedError::Status(503)),
            facilities: None,
            radio_feeds: None,
        }
    }

    #[test]
    fn newer_incidents_do_not_move_the_cursor_off_its_row() {
        let mut app = app_with_incidents();
        app.select_down(1);
        let before = app.selected_key();
        assert_eq!(before.as_ref().and_then(|key| key.time.as_deref()), Some("09:00"));

        app.apply_outcome(dispatch_only(vec![record("11:00", "4 Pine St", "Fire")]));

        assert_eq!(app.row_count(), 4);
        assert_eq!(app.selected_row, 2);
        assert_eq!(app.selected_key(), before);
    }

    #[test]
    fn cursor_is_clamped_when_its_row_is_gone() {
        let mut app = app_with_incidents();
        app.select_last();
        app.dashboard.table.filter = "elm".to_string();

        app.apply_outcome(dispatch_only(Vec::new()));

        assert_eq!(app.row_count(), 1);
        assert_eq!(app.selected_row, 0);
    }
}
