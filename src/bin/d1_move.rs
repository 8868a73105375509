//! d1_move - Send a joint-position command to the arm
//!
//! Takes one target angle per joint (degrees) and an optional trailing
//! duration (seconds), builds the validated command document, and
//! publishes it once to the arm's command topic.
//!
//! Exit codes: 0 published, 1 wrong argument count, 2 any setup or
//! publish failure.

use clap::Parser;
use d1ctl::{ArmCommand, Config, JointAngleRequest};
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "d1_move")]
#[command(about = "Send a joint-position command to the D1 arm")]
#[command(version)]
struct Args {
    /// Target angles in degrees, one per joint, optionally followed by
    /// a duration in seconds (default from config)
    #[arg(allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Zenoh endpoint override (default: ambient zenoh configuration)
    #[arg(long)]
    endpoint: Option<String>,

    /// Command topic override
    #[arg(long)]
    topic: Option<String>,

    /// Build and print the wire document without publishing
    #[arg(long)]
    dry_run: bool,

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
            eprintln!("d1_move: {}", e);
            return 2;
        }
    };
    let dof = config.protocol.dof_count;

    // Exactly dof angles, or dof angles plus a duration.
    if args.values.len() != dof && args.values.len() != dof + 1 {
        eprintln!(
            "Usage: d1_move a0 .. a{} [duration_s]  ({} joint angles in degrees, got {} values)",
            dof - 1,
            dof,
            args.values.len()
        );
        return 1;
    }

    let mut values = args.values;
    let request = if values.len() == dof + 1 {
        let duration = values.pop().unwrap_or(config.protocol.default_duration);
        JointAngleRequest::new(values, duration)
    } else {
        JointAngleRequest::with_default_duration(values, &config.protocol)
    };

    let command = match ArmCommand::build(&request, &config.protocol) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid request: {}", e);
            eprintln!("d1_move: {}", e);
            return 2;
        }
    };

    if args.dry_run {
        match serde_json::to_string(&command) {
            Ok(wire) => {
                println!("{}", wire);
                return 0;
            }
            Err(e) => {
                eprintln!("d1_move: {}", e);
                return 2;
            }
        }
    }

    let topic = args.topic.as_deref().unwrap_or(&config.transport.topic);
    let endpoint = args
        .endpoint
        .as_deref()
        .or(config.transport.endpoint.as_deref());

    match publish(command, endpoint, topic, request.duration).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("d1_move: {}", e);
            2
        }
    }
}

async fn publish(
    command: ArmCommand,
    endpoint: Option<&str>,
    topic: &str,
    duration: f64,
) -> anyhow::Result<()> {
    let context = d1ctl::TransportContext::connect(endpoint).await?;
    let publisher = context.command_publisher(topic).await?;

    publisher.publish(&command).await?;
    info!("Sent joint command (funcode={}), duration={}s", command.function_code, duration);
    Ok(())
}
