use std::fs::File;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use http_explorer::app::App;
use http_explorer::config::{self, Config};
use http_explorer::http::{self, Dispatcher, HttpResult, ReqwestTransport};
use http_explorer::ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config)?;

    let transport = ReqwestTransport::new(&config).context("failed to create HTTP client")?;
    let dispatcher = Arc::new(Dispatcher::new(transport));

    tracing::info!(
        user_agent = %config.user_agent,
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "starting http-explorer"
    );

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, dispatcher).await;
    ratatui::restore();
    result
}

/// Logs go to a file when one is configured; the terminal belongs to the UI
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

async fn run(
    terminal: &mut DefaultTerminal,
    dispatcher: Arc<Dispatcher<ReqwestTransport>>,
) -> anyhow::Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<HttpResult>();
    let mut events = EventStream::new();

    loop {
        let screen = terminal.draw(|frame| ui::render(frame, &app))?.area;
        app.set_response_rows(ui::response_row_count(&app, screen));

        tokio::select! {
            Some(result) = rx.recv() => app.finish_send(result),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(draft) = app.handle_key(key) {
                        tokio::spawn(http::send_request(dispatcher.clone(), draft, tx.clone()));
                    }
                }
                // Resize and other events just trigger a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
