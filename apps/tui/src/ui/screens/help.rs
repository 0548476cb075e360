use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const SHORTCUTS: [(&str, &str); 14] = [
    ("↑/↓", "Move selection"),
    ("PgUp/PgDn", "Jump 5 rows"),
    ("Home/End", "First/last row"),
    ("Enter", "Highlight incident on the map (radio follows if auto-switch is on)"),
    ("t", "Cycle sort: time, type, location"),
    ("h", "Show all history instead of the newest rows"),
    ("a", "Toggle all incidents / priority incidents"),
    ("p", "Toggle plume overlays"),
    ("[ / ]", "Previous / next radio channel"),
    ("w", "Toggle radio auto-switch"),
    ("/", "Filter incidents (Esc clears)"),
    ("r", "Refresh now"),
    ("F1", "Toggle this help"),
    ("q", "Quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Hazard Watch",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Plumes are advisory triangles pointing downwind of each facility, not a dispersion model.",
        ),
        TextLine::from(""),
    ];

    lines.extend(SHORTCUTS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(
                format!("  {key:<10}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" - {action}")),
        ])
    }));

    let paragraph = Paragraph::new(lines)
        .block(help_block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}
