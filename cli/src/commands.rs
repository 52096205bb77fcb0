pub mod connect;
pub mod exchange;
pub mod probe;

use std::num::NonZeroUsize;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use profilenet_common::config::Config;
use profilenet_common::{Deadline, Endpoint};

const DEFAULT_MAX_BYTES: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(n) => n,
    None => panic!("reply buffer must hold at least one byte"),
};

#[derive(Parser)]
#[command(name = "profilenet")]
#[command(about = "Reachability checks and timed exchanges with a profile server.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Profile server used when a command is given no endpoint (e.g. 127.0.0.1:1234)
    #[arg(long, global = true)]
    pub server: Option<Endpoint>,

    /// Identifier this machine reports to the profile server
    #[arg(long, global = true)]
    pub machine_id: Option<u64>,

    /// More output; pass twice to log traffic
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether an endpoint accepts TCP connections
    #[command(alias = "p")]
    Probe {
        endpoint: Option<Endpoint>,
        /// How long to wait for the handshake, 0 to check once
        #[arg(short, long)]
        timeout_ms: Option<Deadline>,
    },
    /// Open a connection with the system connect timeout, then close it
    #[command(alias = "c")]
    Connect { endpoint: Option<Endpoint> },
    /// Send a payload and wait for one reply
    #[command(alias = "x")]
    Exchange {
        payload: String,
        /// Defaults to --server
        #[arg(short, long)]
        endpoint: Option<Endpoint>,
        /// Budget for the send and for the receive, each
        #[arg(short, long)]
        deadline_ms: Option<Deadline>,
        /// Largest reply to read, at least 1
        #[arg(short, long, default_value_t = DEFAULT_MAX_BYTES)]
        max_bytes: NonZeroUsize,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Resolves the endpoint a command acts on, falling back to `--server`.
pub fn target(explicit: Option<Endpoint>, cfg: &Config) -> anyhow::Result<Endpoint> {
    cfg.target(explicit)
        .ok_or_else(|| anyhow!("no endpoint given and no --server configured"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
