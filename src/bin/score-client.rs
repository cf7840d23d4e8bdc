//! Terminal client: type `name <value>`, `score <value>` then `publish`; every board received is printed.

use anyhow::Context;
use clap::Parser;
use scoreboard_back::{
    client::{DEFAULT_SERVER_URL, ScoreClient, WsTransport},
    dto::ws::ServerMessage,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// WebSocket URL of the scoreboard server
    #[clap(short, long, default_value = DEFAULT_SERVER_URL)]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let transport = WsTransport::connect(&args.url)
        .await
        .with_context(|| format!("connecting to {}", args.url))?;
    let mut client = ScoreClient::new(transport);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                let line = line.trim();
                match line.split_once(' ') {
                    Some((field, value)) => {
                        if !client.handle_input(field, value.trim()) {
                            warn!(field, "unknown input; expected `name` or `score`");
                        }
                    }
                    None if line == "publish" => client.publish().await.context("publishing score")?,
                    None if line.is_empty() => {}
                    None => warn!(command = line, "unknown command"),
                }
            }
            update = client.next_update() => {
                match update.context("receiving update")? {
                    ServerMessage::Connected(payload) => println!("connected as {}", payload.id),
                    ServerMessage::PlayerScores(_) => {
                        println!("--- scores ---");
                        for line in client.render() {
                            println!("{line}");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
