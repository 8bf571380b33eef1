use clap::Parser;
use tracing::info;

use billboard_console::api::{ApiClient, Session};
use billboard_console::app::App;
use billboard_console::config::{Cli, Config};
use billboard_console::logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::from_cli(Cli::parse())?;
    logging::init(&config.log_file)?;
    info!(api = %config.api_base, "starting billboard console");

    let client = ApiClient::http()?;
    let session = match &config.token {
        Some(token) => Session::new(config.api_base.clone()).with_token(token.as_str()),
        None => Session::new(config.api_base.clone()),
    };

    let terminal = ratatui::init();
    let result = App::new(client, session).run(terminal);
    ratatui::restore();
    result
}
