//! d1_pub - Forward one raw command document from stdin
//!
//! Reads a single line from standard input and publishes it verbatim to
//! the arm's command topic. No validation, no command builder: whatever
//! the line says goes on the wire. Intended for scripting function
//! codes this tool has no builder for (single-joint moves, torque
//! lock), exactly as piped JSON drove the original publisher.
//!
//! Exit codes: 0 published, 1 no line on stdin, 2 any setup or publish
//! failure.

use clap::Parser;
use d1ctl::{Config, TransportContext};
use std::io::BufRead;
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "d1_pub")]
#[command(about = "Publish one raw command document from stdin, unvalidated")]
#[command(version)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Zenoh endpoint override (default: ambient zenoh configuration)
    #[arg(long)]
    endpoint: Option<String>,

    /// Command topic override
    #[arg(long)]
    topic: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    std::process::exit(run(args).await);
}

async fn run(args: Args) -> i32 {
    let config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("d1_pub: {}", e);
            return 2;
        }
    };

    let mut document = String::new();
    match std::io::stdin().lock().read_line(&mut document) {
        Ok(0) => {
            eprintln!("d1_pub: expected one command document on stdin");
            return 1;
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("d1_pub: failed to read stdin: {}", e);
            return 2;
        }
    }
    let document = document.trim_end_matches(['\r', '\n']);

    let topic = args.topic.as_deref().unwrap_or(&config.transport.topic);
    let endpoint = args
        .endpoint
        .as_deref()
        .or(config.transport.endpoint.as_deref());

    match forward(document, endpoint, topic).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("d1_pub: {}", e);
            2
        }
    }
}

async fn forward(document: &str, endpoint: Option<&str>, topic: &str) -> anyhow::Result<()> {
    let context = TransportContext::connect(endpoint).await?;
    let publisher = context.command_publisher(topic).await?;

    publisher.publish_raw(document).await?;
    info!("Forwarded {} bytes to '{}'", document.len(), topic);
    Ok(())
}
