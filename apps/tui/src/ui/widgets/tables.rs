use hazard_watch::incidents::{IncidentRecord, IncidentRow, PLACEHOLDER};
use hazard_watch::feeds::Endpoint;
use hazard_watch::state::DispatchSummary;
use hazard_watch::FeedPanel;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;

pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

fn row_style(row: &IncidentRow<'_>, selected: bool, highlighted: bool) -> Style {
    if selected {
        Style::default()
            .bg(Color::Rgb(0, 0, 238))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if row.industrial {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default()
    }
}

fn table_title(app: &App, shown: usize) -> String {
    let dashboard = &app.dashboard;
    let table = &dashboard.table;

    let counts = match &dashboard.dispatch {
        FeedPanel::Ready(summary) => format!(
            "{} priority / {} total",
            summary.priority_count, summary.total_incidents
        ),
        FeedPanel::Loading => "loading".to_string(),
        FeedPanel::Unavailable { .. } => "last good data".to_string(),
    };

    let mut title = format!(
        "{} Incidents ({shown} shown, {counts}) | sort: {}",
        table.scope().label(),
        table.sort_key.label()
    );
    if table.show_all_history {
        title.push_str(" | full history");
    }
    if !table.filter.is_empty() {
        title.push_str(&format!(" | filter: {}", table.filter));
    }
    title
}

/// Placeholder plus error detail while the dispatch feed is down.
fn dispatch_banner(dispatch: &FeedPanel<DispatchSummary>) -> Option<String> {
    let FeedPanel::Unavailable { detail } = dispatch else {
        return None;
    };
    let text = Endpoint::Dispatch.unavailable_text();
    Some(detail.as_deref().map_or_else(
        || text.to_string(),
        |detail| format!("{text}: {detail}"),
    ))
}

pub fn render_incident_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &app.dashboard;
    let rows = dashboard.visible_rows();
    let title = table_title(app, rows.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let banner = dispatch_banner(&dashboard.dispatch);

    if rows.is_empty() {
        let message = match &dashboard.dispatch {
            FeedPanel::Unavailable { .. } => banner.unwrap_or_default(),
            FeedPanel::Loading => "Loading incidents...".to_string(),
            FeedPanel::Ready(_) if !dashboard.table.filter.is_empty() => {
                "No incidents match the filter.".to_string()
            }
            FeedPanel::Ready(_) => "No incidents.".to_string(),
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("Agency"),
        Cell::from("Type"),
        Cell::from("Location"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    // stale rows stay visible under the banner
    let (block, area) = match banner {
        Some(banner) => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let [banner_area, rows_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
            f.render_widget(
                Paragraph::new(banner).style(
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                banner_area,
            );
            (None, rows_area)
        }
        None => (Some(block), area),
    };

    // header, plus borders when the table draws its own block
    let chrome = if block.is_some() { 3 } else { 1 };
    let max_visible_rows = area.height.saturating_sub(chrome) as usize;
    let offset = scroll_offset(rows.len(), max_visible_rows, app.selected_row);

    let visible = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, row)| {
            let record = row.record;
            let highlighted = dashboard
                .highlighted
                .as_ref()
                .is_some_and(|key| record.matches_key(key));

            Row::new(vec![
                Cell::from(record.time_text().to_string()),
                Cell::from(record.agency_text().to_string()),
                Cell::from(record.type_text().to_string()),
                Cell::from(record.location_text().to_string()),
            ])
            .style(row_style(row, i == app.selected_row, highlighted))
        });

    let widths = [
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(24),
        Constraint::Min(20),
    ];

    let mut table = Table::new(visible, widths).header(header).column_spacing(1);
    if let Some(block) = block {
        table = table.block(block);
    }

    f.render_widget(table, area);
}

/// Supplemental fields of the selected row, joined for the detail line.
pub fn detail_text(record: &IncidentRecord) -> String {
    [
        ("Cross", record.cross_street.as_deref()),
        ("Key Map", record.key_map.as_deref()),
        ("Units", record.combined_response.as_deref()),
    ]
    .into_iter()
    .map(|(label, value)| format!("{label}: {}", value.unwrap_or(PLACEHOLDER)))
    .collect::<Vec<_>>()
    .join("  ")
}

pub fn render_incident_detail(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = app.dashboard.visible_rows();
    let Some(row) = rows.get(app.selected_row) else {
        return;
    };

    let line = TextLine::from(vec![
        Span::styled(
            format!("{} ", row.record.location_text()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(detail_text(row.record), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard_watch::config::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw_table(app: &App) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(140, 10))?;
        terminal.draw(|f| render_incident_table(app, f, f.area()))?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect())
    }

    #[test]
    fn no_scroll_when_everything_fits() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn selection_past_the_window_scrolls() {
        assert_eq!(scroll_offset(30, 10, 9), 0);
        assert_eq!(scroll_offset(30, 10, 10), 1);
        assert_eq!(scroll_offset(30, 10, 29), 20);
    }

    #[test]
    fn detail_line_fills_missing_fields() {
        let record = IncidentRecord {
            cross_street: Some("Sheldon Rd".to_string()),
            combined_response: Some("E12, M12".to_string()),
            ..IncidentRecord::default()
        };
        assert_eq!(
            detail_text(&record),
            "Cross: Sheldon Rd  Key Map: --  Units: E12, M12"
        );
    }

    #[test]
    fn failed_dispatch_shows_detail_above_stale_rows() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(AppConfig::default());
        app.dashboard.incidents.ingest(
            vec![IncidentRecord {
                time: Some("09:00".to_string()),
                location: Some("1 Bay Rd".to_string()),
                ..IncidentRecord::default()
            }],
            None,
        );
        app.dashboard.dispatch = FeedPanel::Unavailable {
            detail: Some("scrape failed: 502".to_string()),
        };

        let screen = draw_table(&app)?;
        assert!(screen.contains("DISPATCH FEED UNAVAILABLE: scrape failed: 502"));
        assert!(screen.contains("1 Bay Rd"));
        Ok(())
    }

    #[test]
    fn healthy_dispatch_has_no_banner() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(AppConfig::default());
        app.dashboard.incidents.ingest(
            vec![IncidentRecord {
                time: Some("09:00".to_string()),
                location: Some("1 Bay Rd".to_string()),
                ..IncidentRecord::default()
            }],
            None,
        );

        let screen = draw_table(&app)?;
        assert!(!screen.contains("UNAVAILABLE"));
        assert!(screen.contains("1 Bay Rd"));
        Ok(())
    }
}
