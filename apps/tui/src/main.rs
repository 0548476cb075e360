mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use std::sync::Arc;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use hazard_watch::config::{init_app_config, init_logging};
use hazard_watch::feeds::{FeedSource, HttpFeedSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    let headless = args.headless || !is_terminal();
    init_logging(!headless, config.debug);

    let source: Arc<dyn FeedSource> = Arc::new(HttpFeedSource::new(
        &config.api_base_url,
        config.request_timeout,
    )?);

    if headless {
        return event::run_headless(source, &config, args.json, args.sort).await;
    }

    let mut app = App::new(config);
    app.dashboard.table.sort_key = args.sort;

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, &source).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
