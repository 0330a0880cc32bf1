//! `todo` -- interactive terminal client for a DummyJSON-style todo API.
//!
//! Configuration comes from the environment (see `todo_app::config`).
//! Logs go to stderr; set `RUST_LOG=todo_app=debug,todo_core=debug` to see
//! every request and cache decision.

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use todo_app::{AppConfig, Command, Flow, Shell, UreqTransport};
use todo_core::{QueryClient, TodoApi, TodoClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PROMPT: &str = "todo> ";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        base_url = %config.base_url,
        page_size = config.page_size,
        stale_secs = config.query.stale_time.as_secs(),
        retry = config.query.retry,
        "starting todo",
    );

    let api = TodoApi::new(
        TodoClient::new(&config.base_url),
        UreqTransport::new(config.http_timeout),
    );
    let mut shell = Shell::new(QueryClient::new(api, config.query), config.page_size);
    let mut editor = DefaultEditor::new().context("failed to open the terminal")?;

    println!("{}", shell.view());
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read a command"),
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = editor.add_history_entry(line.as_str()) {
            tracing::debug!(error = %err, "could not record history");
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let confirm = |prompt: &str| {
            matches!(
                editor.readline(&format!("{prompt} [y/N] ")),
                Ok(answer) if answer.trim().eq_ignore_ascii_case("y")
            )
        };
        match shell.handle(command, confirm) {
            Flow::Quit => break,
            Flow::Continue(message) => {
                if let Some(message) = message {
                    println!("{message}");
                }
                println!("{}", shell.view());
            }
        }
    }

    tracing::info!("bye");
    Ok(())
}
