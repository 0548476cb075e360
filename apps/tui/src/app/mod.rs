// App module for hazard-watch
// Holds the interactive state and key handling around the dashboard

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;
