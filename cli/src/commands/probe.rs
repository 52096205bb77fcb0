use std::process::ExitCode;
use std::time::Instant;

use profilenet_common::config::Config;
use profilenet_common::{Deadline, Endpoint, NetError};
use profilenet_core::check_connectable;

use crate::commands::target;
use crate::terminal::print;

const KEY_WIDTH: usize = 8;

pub fn probe(
    endpoint: Option<Endpoint>,
    timeout: Option<Deadline>,
    cfg: &Config,
) -> anyhow::Result<ExitCode> {
    let endpoint: Endpoint = target(endpoint, cfg)?;
    let timeout: Deadline = timeout.unwrap_or(cfg.probe_timeout);

    print::aligned_line("Endpoint", endpoint, KEY_WIDTH);
    print::aligned_line("Timeout", timeout, KEY_WIDTH);

    let started: Instant = Instant::now();
    let result: Result<(), NetError> = check_connectable(endpoint, timeout);
    let elapsed = format!("{:.1}ms", started.elapsed().as_secs_f64() * 1_000.0);
    print::aligned_line("Elapsed", elapsed, KEY_WIDTH);

    match result {
        Ok(()) => {
            print::verdict(true, &format!("{endpoint} is reachable"));
            Ok(ExitCode::SUCCESS)
        }
        Err(NetError::SocketCreate { source, .. }) => Err(source.into()),
        Err(e) => {
            print::verdict(false, &e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}
