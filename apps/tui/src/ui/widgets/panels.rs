use hazard_watch::feeds::{Endpoint, Severity};
use hazard_watch::geo::{arrow_glyph, compute_heading, indicator_rotation};
use hazard_watch::incidents::PLACEHOLDER;
use hazard_watch::{DashboardState, FeedPanel};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Cyan,
    }
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Placeholder lines for a panel without data, or `None` when it is ready.
fn status_lines<T>(panel: &FeedPanel<T>, endpoint: Endpoint) -> Option<Vec<TextLine<'static>>> {
    match panel {
        FeedPanel::Ready(_) => None,
        FeedPanel::Loading => Some(vec![TextLine::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Gray),
        ))]),
        FeedPanel::Unavailable { .. } => Some(vec![TextLine::from(Span::styled(
            endpoint.unavailable_text(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))]),
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

pub fn render_wind_panel(dashboard: &DashboardState, f: &mut Frame<'_>, area: Rect) {
    let lines = status_lines(&dashboard.wind, Endpoint::Wind).unwrap_or_else(|| {
        dashboard.wind.ready().map_or_else(Vec::new, |wind| {
            let heading = compute_heading(&wind.direction);
            let arrow = arrow_glyph(indicator_rotation(heading));
            let (risk_text, risk_color) = if wind.risk {
                ("PLUME RISK", Color::Red)
            } else {
                ("No plume risk", Color::Green)
            };

            let mut lines = vec![
                TextLine::from(vec![
                    Span::styled(
                        format!("{arrow} {}", wind.direction),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {}  {}", wind.speed, wind.temperature)),
                ]),
                TextLine::from(Span::styled(risk_text, Style::default().fg(risk_color))),
            ];
            if let Some(forecast) = &wind.forecast {
                lines.push(TextLine::from(Span::styled(
                    forecast.clone(),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines
        })
    });

    let paragraph = Paragraph::new(lines)
        .block(panel_block("Wind"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_caer_panel(dashboard: &DashboardState, f: &mut Frame<'_>, area: Rect) {
    let title = dashboard.caer.ready().map_or_else(
        || "CAER".to_string(),
        |board| format!("CAER ({})", board.active_count()),
    );

    let lines = status_lines(&dashboard.caer, Endpoint::Caer).unwrap_or_else(|| {
        let messages = dashboard
            .caer
            .ready()
            .map_or(&[][..], |board| board.messages.as_slice());
        if messages.is_empty() {
            return vec![TextLine::from("No active notices")];
        }
        messages
            .iter()
            .map(|message| {
                TextLine::from(vec![
                    Span::styled(
                        format!("[{}] ", message.severity.label()),
                        Style::default()
                            .fg(severity_color(message.severity))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(message.title.clone()),
                ])
            })
            .collect()
    });

    let paragraph = Paragraph::new(lines)
        .block(panel_block(&title))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_alerts_panel(dashboard: &DashboardState, f: &mut Frame<'_>, area: Rect) {
    let lines = status_lines(&dashboard.weather_alerts, Endpoint::WeatherAlerts).unwrap_or_else(
        || {
            let alerts = dashboard.weather_alerts.ready().map_or(&[][..], Vec::as_slice);
            if alerts.is_empty() {
                return vec![TextLine::from("No active alerts")];
            }
            alerts
                .iter()
                .map(|alert| {
                    TextLine::from(vec![
                        Span::styled(
                            or_placeholder(alert.event.as_deref()),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(format!(" {}", or_placeholder(alert.area.as_deref()))),
                    ])
                })
                .collect()
        },
    );

    let paragraph = Paragraph::new(lines)
        .block(panel_block("Weather Alerts"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_emissions_panel(dashboard: &DashboardState, f: &mut Frame<'_>, area: Rect) {
    let lines = status_lines(&dashboard.emissions, Endpoint::Emissions).unwrap_or_else(|| {
        let events = dashboard.emissions.ready().map_or(&[][..], Vec::as_slice);
        if events.is_empty() {
            return vec![TextLine::from("No reported events")];
        }
        events
            .iter()
            .map(|event| {
                TextLine::from(vec![
                    Span::styled(
                        or_placeholder(event.facility.as_deref()),
                        Style::default().fg(Color::LightRed),
                    ),
                    Span::raw(format!(
                        " {} {}",
                        or_placeholder(event.event_type.as_deref()),
                        or_placeholder(event.start.as_deref())
                    )),
                ])
            })
            .collect()
    });

    let paragraph = Paragraph::new(lines)
        .block(panel_block("Emission Events"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_radio_line(dashboard: &DashboardState, f: &mut Frame<'_>, area: Rect) {
    let radio = &dashboard.radio;
    let channel = radio.current.as_ref().map_or_else(
        || Span::styled(Endpoint::RadioFeeds.unavailable_text(), Style::default().fg(Color::Gray)),
        |feed| {
            Span::styled(
                format!("{} ({})", feed.name, feed.id),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        },
    );
    let listen = radio
        .current
        .as_ref()
        .filter(|feed| !feed.url.is_empty())
        .map_or_else(String::new, |feed| format!("  {}", feed.url));

    let line = TextLine::from(vec![
        Span::raw("Radio: "),
        channel,
        Span::raw(format!(
            "  auto-switch {}",
            if radio.auto_switch { "ON" } else { "OFF" }
        )),
        Span::styled(listen, Style::default().fg(Color::Gray)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
