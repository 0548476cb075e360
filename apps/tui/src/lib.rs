// Export our modules for use in the binary and tests
pub mod config;
pub mod domain;
pub mod feeds;
pub mod geo;
pub mod incidents;
pub mod poll;
pub mod radio;
pub mod state;

pub use domain::{IncidentScope, SortKey};
pub use poll::{fetch_cycle, PollOutcome, StaticFeeds};
pub use state::{DashboardState, FeedPanel};
