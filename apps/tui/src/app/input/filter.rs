use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_filter_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.cancel_filter(),
        KeyCode::Enter => app.apply_filter(),
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(ch) => app.filter_input.push(ch),
        _ => {}
    }
}
