use crate::app::App;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::panels::{
    render_alerts_panel, render_caer_panel, render_emissions_panel, render_radio_line,
    render_wind_panel,
};
use crate::ui::widgets::tables::{render_incident_detail, render_incident_table};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let [header, body, table, detail, radio, status, shortcuts] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(50),
        Constraint::Min(6),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(f.area());

    render_header(app, f, header);

    let [map, side] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    render_map(&app.dashboard, f, map);

    let [wind, caer, alerts, emissions] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(3),
        Constraint::Min(3),
        Constraint::Min(3),
    ])
    .areas(side);
    render_wind_panel(&app.dashboard, f, wind);
    render_caer_panel(&app.dashboard, f, caer);
    render_alerts_panel(&app.dashboard, f, alerts);
    render_emissions_panel(&app.dashboard, f, emissions);

    render_incident_table(app, f, table);
    render_incident_detail(app, f, detail);
    render_radio_line(&app.dashboard, f, radio);
    render_status(app, f, status);
    render_shortcuts(f, shortcuts);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let activity = if app.in_flight > 0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let frame = (app.animation_counter * 2.0) as usize % SPINNER.len();
        format!(" {} polling", SPINNER[frame])
    } else {
        String::new()
    };

    let line = TextLine::from(vec![
        Span::styled(
            "HAZARD WATCH",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            app.dashboard.last_refreshed_label(),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(activity, Style::default().fg(Color::Yellow)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if app.filter_editing {
        TextLine::from(vec![
            Span::styled(
                "Filter: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(app.filter_input.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        TextLine::from(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Gray),
        ))
    };

    f.render_widget(Paragraph::new(line), area);
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let help_text = vec![
        key_span("↑/↓"),
        Span::raw(": Select   "),
        key_span("Enter"),
        Span::raw(": Highlight   "),
        key_span("t"),
        Span::raw(": Sort   "),
        key_span("a"),
        Span::raw(": All/Priority   "),
        key_span("/"),
        Span::raw(": Filter   "),
        key_span("[ ]"),
        Span::raw(": Radio   "),
        key_span("r"),
        Span::raw(": Refresh   "),
        key_span("F1"),
        Span::raw(": Help   "),
        key_span("q"),
        Span::raw(": Quit"),
    ];

    let paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
