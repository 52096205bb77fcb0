mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, connect, exchange, probe};
use profilenet_common::config::{Config, DEFAULT_IO_DEADLINE, DEFAULT_PROBE_TIMEOUT};
use terminal::{logging, print};

fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);

    let cfg = Config {
        server: commands.server,
        machine_id: commands.machine_id,
        probe_timeout: DEFAULT_PROBE_TIMEOUT,
        io_deadline: DEFAULT_IO_DEADLINE,
        verbose_log_output: commands.verbose > 0,
        quiet: commands.quiet,
    };

    match commands.command {
        Commands::Probe { endpoint, timeout_ms } => {
            print::header("probing endpoint", cfg.quiet);
            probe::probe(endpoint, timeout_ms, &cfg)
        }
        Commands::Connect { endpoint } => {
            print::header("connecting", cfg.quiet);
            connect::connect(endpoint, &cfg)
        }
        Commands::Exchange {
            endpoint,
            payload,
            deadline_ms,
            max_bytes,
        } => {
            print::header("exchanging data", cfg.quiet);
            exchange::exchange(endpoint, &payload, deadline_ms, max_bytes, &cfg)
        }
    }
}
