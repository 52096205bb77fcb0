use std::num::NonZeroUsize;
use std::process::ExitCode;

use anyhow::bail;
use profilenet_common::config::Config;
use profilenet_common::{Deadline, Endpoint};
use profilenet_core::{ConnectionHandle, IoOutcome, recv, send};

use crate::commands::target;
use crate::terminal::print;

const KEY_WIDTH: usize = 8;

pub fn exchange(
    endpoint: Option<Endpoint>,
    payload: &str,
    deadline: Option<Deadline>,
    max_bytes: NonZeroUsize,
    cfg: &Config,
) -> anyhow::Result<ExitCode> {
    let endpoint: Endpoint = target(endpoint, cfg)?;
    let deadline: Deadline = deadline.unwrap_or(cfg.io_deadline);

    print::aligned_line("Endpoint", endpoint, KEY_WIDTH);
    print::aligned_line("Deadline", deadline, KEY_WIDTH);
    if let Some(machine_id) = cfg.machine_id {
        print::aligned_line("Machine", machine_id, KEY_WIDTH);
    }

    let mut handle: ConnectionHandle = profilenet_core::connect(endpoint)?;
    handle.set_traffic_logging(cfg.verbose_log_output);

    match send(&mut handle, payload.as_bytes(), deadline) {
        IoOutcome::Transferred(n) => print::aligned_line("Sent", format!("{n} bytes"), KEY_WIDTH),
        IoOutcome::WouldBlock => {
            print::verdict(false, &format!("{endpoint} did not accept data within {deadline}"));
            handle.close();
            return Ok(ExitCode::FAILURE);
        }
        IoOutcome::Failed(source) => bail!("sending to {endpoint} failed: {source}"),
    }

    let mut buffer: Vec<u8> = vec![0u8; max_bytes.get()];
    let code = match recv(&mut handle, &mut buffer, deadline) {
        IoOutcome::Transferred(0) => {
            print::verdict(false, &format!("{endpoint} closed the connection without replying"));
            ExitCode::FAILURE
        }
        IoOutcome::Transferred(n) => {
            print::aligned_line("Received", format!("{n} bytes"), KEY_WIDTH);
            print::print_status(String::from_utf8_lossy(&buffer[..n]));
            ExitCode::SUCCESS
        }
        IoOutcome::WouldBlock => {
            print::verdict(false, &format!("no reply from {endpoint} within {deadline}"));
            ExitCode::FAILURE
        }
        IoOutcome::Failed(source) => bail!("receiving from {endpoint} failed: {source}"),
    };

    handle.close();
    Ok(code)
}
