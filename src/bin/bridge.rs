//! alttp-bridge binary
//!
//! Wires the RetroArch client to the poll loop and runs a small stdin
//! command REPL on the foreground task.
//!
//! ## Configuration (flags / env)
//!
//! | Key                     | Default     | Description                     |
//! |-------------------------|-------------|---------------------------------|
//! | `BRIDGE_HOST`           | `127.0.0.1` | RetroArch host                  |
//! | `BRIDGE_PORT`           | `55355`     | RetroArch UDP command port      |
//! | `BRIDGE_POLL_HZ`        | `30`        | Poll cadence                    |
//! | `BRIDGE_BLOCKED_TICKS`  | `1`         | Blocked-movement trigger ticks  |

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use alttp_bridge::memory::MemoryReader;
use alttp_bridge::tables::MEMORY_MAP;
use alttp_bridge::{BridgeConfig, LineSink, Poller, ProximityEngine, RetroArchClient};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "alttp-bridge", about = "ALttP accessibility bridge", version)]
struct Args {
    /// RetroArch host
    #[arg(long, env = "BRIDGE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// RetroArch UDP network-command port
    #[arg(long, env = "BRIDGE_PORT", default_value_t = RetroArchClient::DEFAULT_PORT)]
    port: u16,

    /// Poll cadence (Hz)
    #[arg(long, env = "BRIDGE_POLL_HZ", default_value_t = 30.0)]
    poll_hz: f64,

    /// Consecutive blocked ticks before a BLOCKED announcement
    #[arg(long, env = "BRIDGE_BLOCKED_TICKS", default_value_t = 1)]
    blocked_ticks: u32,

    /// Attach diagnostic payloads to proximity output
    #[arg(long)]
    diag: bool,
}

const COMMANDS: &[(&str, &str)] = &[
    ("pos", "Current position, room, and direction"),
    ("look", "Description of the current area"),
    ("health", "Health, magic, and resources"),
    ("items", "Equipment and inventory"),
    ("enemies", "Nearby enemies and directions"),
    ("heal", "Restore one heart of health"),
    ("scan", "Nearby room features (doors, chests, hazards)"),
    ("dump", "Write full state snapshot to dump.json"),
    ("progress", "Pendants, crystals, and progress"),
    ("status", "RetroArch connection status"),
    ("help", "List available commands"),
    ("quit", "Exit the program"),
];

const NO_STATE: &str = "No game state available yet.";

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("alttp_bridge=info".parse()?),
        )
        .init();

    let args = Args::parse();

    log::info!(
        "Starting alttp-bridge (host={}:{}, poll={}Hz)",
        args.host,
        args.port,
        args.poll_hz,
    );

    let client = Arc::new(
        RetroArchClient::new(&args.host, args.port)
            .context("Failed to create RetroArch client")?,
    );
    let reader: Arc<dyn MemoryReader> = client.clone();

    let config = BridgeConfig {
        poll_hz: args.poll_hz,
        blocked_threshold: args.blocked_ticks,
        diagnostics: args.diag,
    };

    // Static geometry comes from the separate ROM-parsing tool; the bridge
    // runs without it, losing only geometry-derived announcements.
    let mut poller = Poller::new(config, reader.clone(), None);
    poller.start(Box::new(LineSink::new(args.diag)))?;

    // -----------------------------------------------------------------------
    // Foreground command loop
    // -----------------------------------------------------------------------

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let cmd = line.trim().trim_start_matches('/').to_lowercase();
                        if cmd == "quit" || cmd == "exit" {
                            break;
                        }
                        if !cmd.is_empty() && !handle_command(&cmd, &poller, &client, &reader) {
                            println!("Unknown command: {}. Type help for a list.", cmd);
                        }
                    }
                    Ok(None) => break, // stdin closed
                    Err(e) => {
                        log::warn!("stdin error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutting down (SIGINT)");
                break;
            }
        }
    }

    poller.stop()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Handle one command line.  Returns false when unrecognized.
fn handle_command(
    cmd: &str,
    poller: &Poller,
    client: &RetroArchClient,
    reader: &Arc<dyn MemoryReader>,
) -> bool {
    match cmd.split_whitespace().next().unwrap_or("") {
        "pos" => match poller.latest_snapshot() {
            Some(state) => println!("{}", state.format_position()),
            None => println!("{}", NO_STATE),
        },
        "look" => match poller.latest_snapshot() {
            Some(state) => {
                println!("{}.", state.location_name());
                let desc = state.area_description();
                if desc.is_empty() {
                    println!("No description available for this area.");
                } else {
                    for line in desc.lines().filter(|l| !l.trim().is_empty()) {
                        println!("{}", line.trim());
                    }
                }
                let engine = ProximityEngine::new(Some(reader.clone()));
                let exits = engine.detect_exits(&state);
                if !exits.is_empty() {
                    let parts: Vec<String> = exits
                        .iter()
                        .map(|d| format!("open doorway to the {}", d))
                        .collect();
                    println!("Detected exits: {}.", parts.join(", "));
                }
            }
            None => println!("{}", NO_STATE),
        },
        "health" => match poller.latest_snapshot() {
            Some(state) => println!("{}", state.format_resources()),
            None => println!("{}", NO_STATE),
        },
        "heal" => match poller.latest_snapshot() {
            Some(state) => {
                let hp = state.get("hp");
                let max_hp = state.get("max_hp");
                if hp >= max_hp {
                    println!("Already at full health.");
                } else {
                    let new_hp = (hp + 8).min(max_hp);
                    let addr = MEMORY_MAP
                        .iter()
                        .find(|(name, _, _)| *name == "hp")
                        .map(|(_, addr, _)| *addr)
                        .unwrap_or(0);
                    match client.write_core_memory(addr, &[new_hp as u8]) {
                        Ok(()) => {
                            let hearts = f64::from(new_hp) / 8.0;
                            let label = if hearts == hearts.trunc() {
                                format!("{}", hearts as i64)
                            } else {
                                format!("{:.1}", hearts)
                            };
                            println!("Healed to {}/{} hearts.", label, max_hp / 8);
                        }
                        Err(e) => println!("Heal failed: {}", e),
                    }
                }
            }
            None => println!("{}", NO_STATE),
        },
        "items" => match poller.latest_snapshot() {
            Some(state) => {
                println!("{}", state.format_equipment());
                println!("{}", state.format_inventory());
            }
            None => println!("{}", NO_STATE),
        },
        "enemies" => match poller.latest_snapshot() {
            Some(state) => println!("{}", state.format_enemies()),
            None => println!("{}", NO_STATE),
        },
        "scan" => match poller.latest_snapshot() {
            Some(state) => {
                let engine = ProximityEngine::new(Some(reader.clone()));
                let features = engine.scan(&state);
                if features.is_empty() {
                    println!("No features nearby.");
                } else {
                    println!("Nearby features:");
                    for feature in features {
                        println!("  {}", feature);
                    }
                }
            }
            None => println!("{}", NO_STATE),
        },
        "dump" => match poller.latest_snapshot() {
            Some(state) => {
                let path = cmd.split_whitespace().nth(1).unwrap_or("dump.json");
                let value = state.dump_value();
                match serde_json::to_string_pretty(&value)
                    .map_err(std::io::Error::other)
                    .and_then(|json| std::fs::write(path, json))
                {
                    Ok(()) => println!("State dumped to {}.", path),
                    Err(e) => println!("Dump failed: {}", e),
                }
            }
            None => println!("{}", NO_STATE),
        },
        "progress" => match poller.latest_snapshot() {
            Some(state) => println!("{}", state.format_progress()),
            None => println!("{}", NO_STATE),
        },
        "status" => {
            match client.get_status() {
                Ok(status) => println!("RetroArch status: {}", status),
                Err(_) => println!("RetroArch not responding."),
            }
            if let Ok(version) = client.get_version() {
                println!("RetroArch version: {}", version);
            }
        }
        "help" => {
            println!("Available commands:");
            for (name, desc) in COMMANDS {
                println!("  {} - {}", name, desc);
            }
        }
        _ => return false,
    }
    true
}
