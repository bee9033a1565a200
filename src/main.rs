use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use cardwire::config::Config;
use cardwire::connection::{self, ConnectionController, SessionAddress};
use cardwire::logging::init_tracing;
use cardwire::shutdown::{ShutdownCoordinator, ShutdownPhase};
use cardwire::ui::{self, App, EventHandler};

/// How long to wait for the websocket task to send its close frame.
const SOCKET_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "cardwire", version, about = "Terminal client for server-driven card flows")]
struct Cli {
    /// Page URL, e.g. http://localhost:8080/hello. Falls back to
    /// connection.page_url from the config file.
    page_url: Option<String>,

    /// Action to start on connect instead of the one named by the URL
    #[arg(long, value_name = "NAME")]
    action: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Redraw interval in milliseconds
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;
    if let Some(tick_ms) = cli.tick_ms {
        config.ui.tick_rate_ms = tick_ms;
    }
    config.validate()?;

    init_tracing(&config.logging);

    let Some(page_url) = cli.page_url.or_else(|| config.connection.page_url.clone()) else {
        bail!("No page URL given. Pass one as an argument or set connection.page_url in the config file.");
    };
    let address = SessionAddress::from_page_url(&page_url)?
        .with_action(cli.action.or_else(|| config.connection.default_action.clone()));
    tracing::info!(ws_url = %address.ws_url, action = %address.default_action, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let coordinator = ShutdownCoordinator::new();
    let tick_rate = config.ui.tick_rate();
    let events = EventHandler::new(tick_rate, coordinator.handle());

    let socket_task = {
        let _enter = runtime.enter();
        connection::ws::spawn(address.ws_url.clone(), events.sender(), coordinator.handle())
    };

    let app = App::new(ConnectionController::new(address.default_action), page_url);
    let result = ui::run(app, &events, tick_rate);

    coordinator.signal();
    coordinator.advance(ShutdownPhase::ClosingSocket);
    let mut app = result.context("terminal UI failed")?;
    app.disconnect();
    tracing::info!(
        session = %app.session().id,
        messages = app.session().history.len(),
        "ui closed"
    );

    if runtime
        .block_on(tokio::time::timeout(SOCKET_CLOSE_TIMEOUT, socket_task))
        .is_err()
    {
        tracing::warn!("websocket task did not finish in time");
    }
    runtime.shutdown_timeout(Duration::from_millis(100));
    coordinator.advance(ShutdownPhase::Complete);
    Ok(())
}
