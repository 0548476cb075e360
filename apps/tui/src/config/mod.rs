#[allow(clippy::module_inception)]
pub mod config;

pub use config::{init_app_config, init_logging, AppConfig};
