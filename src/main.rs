//! cmdtree-console - interactive shell over the cmdtree demo grammar.
//!
//! Reads commands from stdin. `?<input>` lists completions, `!usage` prints
//! usage, anything else is executed.

mod config;
mod console;

use crate::config::Config;
use crate::console::Console;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cmdtree.toml".to_string());
    let loaded = Config::load(&config_path);

    // Initialize tracing
    let fallback_level = loaded
        .as_ref()
        .map(|config| config.console.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = loaded.map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid config");
        }
        return Err(anyhow::anyhow!(
            "{} configuration error(s) in {config_path}",
            errors.len()
        ));
    }

    let console = Console::new(&config)?;
    info!(
        path = %config_path,
        nodes = console.dispatcher().tree().len(),
        aliases = config.alias.len(),
        "Console ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(config.console.prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        for output in console.handle_line(&line).await {
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}
