mod dashboard;
mod filter;
mod help;

use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.filter_editing {
        filter::handle_filter_input(app, key);
        return;
    }

    dashboard::handle_dashboard_input(app, key);
}
