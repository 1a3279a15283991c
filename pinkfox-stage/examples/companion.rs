//! Interactive companion demo
//!
//! Wires the playback engine to the HTTP chat backend (default
//! `http://localhost:8000`, override with `PINKFOX_BACKEND`) and a channel
//! renderer whose commands are printed instead of driving a real model.
//! Type a message and watch the reply reveal; `/track` toggles tracking.

use anyhow::Result;
use pinkfox_chat::{ChatConfig, HttpChatClient};
use pinkfox_stage::{ChannelRenderer, ResponseOrchestrator, RodioEngine, StageConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut chat_config = ChatConfig::default();
    if let Ok(base_url) = std::env::var("PINKFOX_BACKEND") {
        chat_config.base_url = base_url;
    }
    let chat = Arc::new(HttpChatClient::new(chat_config)?);

    let renderer = Arc::new(ChannelRenderer::default());
    let mut commands = renderer.subscribe();
    tokio::spawn(async move {
        while let Ok(command) = commands.recv().await {
            println!("[model] {:?}", command);
        }
    });

    let engine = Arc::new(RodioEngine::new()?);
    let orchestrator = Arc::new(ResponseOrchestrator::new(
        StageConfig::default(),
        chat,
        renderer,
        engine,
    )?);

    // Mirror the subtitle overlay: print segments as they reveal
    let subtitles = Arc::clone(&orchestrator);
    tokio::spawn(async move {
        let mut shown = 0;
        loop {
            let segments = subtitles.visible_segments();
            if segments.len() < shown {
                shown = 0; // a new turn replaced the subtitles
            }
            for segment in &segments[shown..] {
                println!("  » {}", segment);
            }
            shown = segments.len();
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });

    println!("PinkFox companion ready. Type a message (Ctrl-D to quit, /track toggles tracking).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/track" {
            let enabled = orchestrator.toggle_tracking();
            println!("tracking {}", if enabled { "on" } else { "off" });
            continue;
        }
        if let Err(e) = orchestrator.submit(&line).await {
            eprintln!("chat failed: {}", e);
        }
    }

    orchestrator.reset();
    Ok(())
}
