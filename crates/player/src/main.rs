//! Wyrdline Player - reads server frames from stdin, one per line, and
//! writes narrative to stdout. Logs go to stderr.

use std::io::BufRead;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wyrdline_player::{ClientSettings, MessageRouter, WriterSink};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wyrdline_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = ClientSettings::from_env();
    tracing::info!(
        combat_style = %settings.combat_style,
        diagnostics = settings.diagnostics,
        wrap_width = settings.wrap_width,
        "Starting Wyrdline Player"
    );

    let mut router = MessageRouter::new(settings);
    let mut sink = WriterSink::new(std::io::stdout().lock());

    let mut frames = 0usize;
    for frame in std::io::stdin().lock().lines() {
        let frame = frame?;
        if frame.trim().is_empty() {
            continue;
        }
        router.dispatch_to(&frame, &mut sink)?;
        frames += 1;
    }

    tracing::info!(frames, "Input closed");
    match serde_json::to_string(&router.snapshot()) {
        Ok(snapshot) => tracing::debug!(%snapshot, "Final client state"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize final client state"),
    }
    Ok(())
}
