use std::sync::Arc;

use cmdport::command::ActionParser;
use cmdport::config::Config;
use cmdport::{delivery, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let (tx, mut rx) = delivery::channel(cfg.listen.channel_capacity);

    let Some(handle) = server::listener::start(&cfg.listen, Arc::new(ActionParser::new()), tx).await?
    else {
        tracing::info!("Remote control disabled (port 0)");
        return Ok(());
    };

    let consumer = tokio::spawn(async move {
        while let Some(commands) = rx.recv().await {
            for action in commands {
                tracing::info!(
                    action = %action.name,
                    argument = action.argument.as_deref().unwrap_or(""),
                    "Received action"
                );
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    handle.shutdown().await;
    consumer.abort();

    Ok(())
}
