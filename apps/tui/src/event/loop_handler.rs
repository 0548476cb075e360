use chrono::Local;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedSender};

use hazard_watch::config::AppConfig;
use hazard_watch::feeds::{Endpoint, FeedSource};
use hazard_watch::geo::compute_heading;
use hazard_watch::{fetch_cycle, DashboardState, FeedPanel, SortKey, StaticFeeds};

use crate::app::{handle_input, App};
use crate::terminal::Tui;
use crate::ui;

/// Entries listed in the headless summary.
const HEADLESS_RECENT: usize = 10;

/// Spawns one poll cycle. The outcome comes back on `tx`; a closed channel
/// means the loop has exited and the outcome is dropped.
fn spawn_cycle(
    source: &Arc<dyn FeedSource>,
    statics: StaticFeeds,
    tx: UnboundedSender<hazard_watch::PollOutcome>,
) {
    let source = Arc::clone(source);
    tokio::spawn(async move {
        let outcome = fetch_cycle(source.as_ref(), statics).await;
        if tx.send(outcome).is_err() {
            log::debug!("poll cycle finished after shutdown");
        }
    });
}

/// Run one poll cycle and print a summary (no UI)
pub async fn run_headless(
    source: Arc<dyn FeedSource>,
    config: &AppConfig,
    json: bool,
    sort: SortKey,
) -> Result<()> {
    log::info!("polling {}", config.api_base_url);

    let mut dashboard = DashboardState::new();
    dashboard.table.sort_key = sort;

    let outcome = fetch_cycle(source.as_ref(), StaticFeeds::ALL).await;
    let failed = outcome.failures();
    dashboard.apply(outcome, Local::now());

    let stats = build_headless_stats(&dashboard, &failed);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nHazard Watch");
    println!("============");
    println!("{}", stats.last_update);

    match &stats.wind {
        Some(wind) => println!(
            "Wind: {} ({:.1}°) {} | {} | risk: {}",
            wind.direction,
            wind.heading,
            wind.speed,
            wind.temperature,
            if wind.risk { "YES" } else { "no" }
        ),
        None => println!("Wind: {}", Endpoint::Wind.unavailable_text()),
    }

    match stats.caer_active {
        Some(count) => println!("CAER notices: {count}"),
        None => println!("CAER: {}", Endpoint::Caer.unavailable_text()),
    }
    println!("Weather alerts: {}", count_or_dash(stats.weather_alerts));
    println!("Emission events: {}", count_or_dash(stats.emission_events));
    println!(
        "Facilities: {} ({} plumes)",
        stats.facilities, stats.plumes
    );
    println!(
        "Radio: {}",
        stats.radio_channel.as_deref().unwrap_or("(none)")
    );

    println!(
        "\nIncidents: {} priority / {} total",
        stats.priority_incidents, stats.total_incidents
    );
    for incident in &stats.recent_incidents {
        println!(
            "- {} | {} | {} | {}{}",
            incident.time,
            incident.agency,
            incident.incident_type,
            incident.location,
            if incident.industrial { " [industrial]" } else { "" }
        );
    }

    if !stats.unavailable.is_empty() {
        println!("\nUnavailable feeds:");
        for feed in &stats.unavailable {
            println!("- {feed}");
        }
    }
}

fn count_or_dash(count: Option<usize>) -> String {
    count.map_or_else(|| "--".to_string(), |count| count.to_string())
}

fn build_headless_stats(dashboard: &DashboardState, failed: &[Endpoint]) -> HeadlessStats {
    let wind = dashboard.wind.ready().map(|wind| HeadlessWind {
        direction: wind.direction.clone(),
        heading: compute_heading(&wind.direction),
        speed: wind.speed.clone(),
        temperature: wind.temperature.clone(),
        risk: wind.risk,
    });

    let (priority_incidents, total_incidents) = match &dashboard.dispatch {
        FeedPanel::Ready(summary) => (summary.priority_count, summary.total_incidents),
        _ => (
            dashboard.incidents.priority.len(),
            dashboard.incidents.full.len(),
        ),
    };

    let recent_incidents = dashboard
        .visible_rows()
        .into_iter()
        .take(HEADLESS_RECENT)
        .map(|row| HeadlessIncident {
            time: row.record.time_text().to_string(),
            agency: row.record.agency_text().to_string(),
            incident_type: row.record.type_text().to_string(),
            location: row.record.location_text().to_string(),
            industrial: row.industrial,
        })
        .collect();

    HeadlessStats {
        last_update: dashboard.last_refreshed_label(),
        sort_key: dashboard.table.sort_key.as_str(),
        wind,
        caer_active: dashboard.caer.ready().map(|board| board.active_count()),
        weather_alerts: dashboard.weather_alerts.ready().map(Vec::len),
        emission_events: dashboard.emissions.ready().map(Vec::len),
        facilities: dashboard.facilities.len(),
        plumes: dashboard.plumes().len(),
        radio_channel: dashboard.radio.current.as_ref().map(|feed| feed.name.clone()),
        priority_incidents,
        total_incidents,
        recent_incidents,
        unavailable: failed
            .iter()
            .map(|endpoint| endpoint.unavailable_text())
            .collect(),
    }
}

#[derive(Debug, serde::Serialize)]
struct HeadlessStats {
    last_update: String,
    sort_key: &'static str,
    wind: Option<HeadlessWind>,
    caer_active: Option<usize>,
    weather_alerts: Option<usize>,
    emission_events: Option<usize>,
    facilities: usize,
    plumes: usize,
    radio_channel: Option<String>,
    priority_incidents: usize,
    total_incidents: usize,
    recent_incidents: Vec<HeadlessIncident>,
    unavailable: Vec<&'static str>,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessWind {
    direction: String,
    heading: f64,
    speed: String,
    temperature: String,
    risk: bool,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessIncident {
    time: String,
    agency: String,
    incident_type: String,
    location: String,
    industrial: bool,
}

/// Waits up to `timeout` for terminal input without stalling the runtime's
/// other workers.
fn input_ready(timeout: Duration) -> bool {
    tokio::task::block_in_place(|| matches!(event::poll(timeout), Ok(true)))
}

/// Run the main application event loop. Poll cycles run on spawned tasks
/// while this loop owns the state. Needs the multi-threaded runtime.
pub async fn run(terminal: &mut Tui, app: &mut App, source: &Arc<dyn FeedSource>) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut next_poll = Instant::now();

    loop {
        // Update animations
        app.update();

        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }

        if app.refresh_requested || Instant::now() >= next_poll {
            app.refresh_requested = false;
            spawn_cycle(source, app.dashboard.static_feeds_needed(), tx.clone());
            app.in_flight += 1;
            next_poll = Instant::now() + app.config.refresh_interval;
            log::debug!("poll cycle spawned ({} in flight)", app.in_flight);
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if input_ready(Duration::from_millis(EVENT_POLL_TIMEOUT)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Redraw happens on the next pass
                }
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}
