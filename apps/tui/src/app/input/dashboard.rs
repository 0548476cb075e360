use crate::app::state::{App, PAGE_STEP};
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc => {
            if app.dashboard.table.filter.is_empty() {
                app.dashboard.highlighted = None;
            } else {
                app.clear_filter();
            }
        }
        KeyCode::Up => app.select_up(1),
        KeyCode::Down => app.select_down(1),
        KeyCode::PageUp => app.select_up(PAGE_STEP),
        KeyCode::PageDown => app.select_down(PAGE_STEP),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.highlight_selected(),
        KeyCode::Char('t') => app.cycle_sort(),
        KeyCode::Char('h') => app.toggle_show_all_history(),
        KeyCode::Char('a') => app.toggle_scope(),
        KeyCode::Char('p') => app.toggle_plumes(),
        KeyCode::Char(']') => app.radio_next(),
        KeyCode::Char('[') => app.radio_prev(),
        KeyCode::Char('w') => app.toggle_auto_switch(),
        KeyCode::Char('/') => app.begin_filter(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}
