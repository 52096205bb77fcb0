use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use profilenet_common::{Deadline, Endpoint, NetError};
use socket2::SockRef;
use tracing::{error, trace, warn};

use crate::network::handle::ConnectionHandle;

const TRAFFIC_PREVIEW_LEN: usize = 64;

/// What a single timed send or receive did.
#[derive(Debug)]
pub enum IoOutcome {
    /// `n` bytes moved. A receive of 0 bytes means the peer shut down its side.
    Transferred(usize),
    /// The deadline passed before anything could be moved. Not an error.
    WouldBlock,
    /// The OS reported a real failure.
    Failed(io::Error),
}

impl IoOutcome {
    /// Bytes moved. `WouldBlock` and `Failed` both count as zero, so check
    /// [`is_would_block`](Self::is_would_block) and [`is_failed`](Self::is_failed)
    /// before reading a zero as end-of-stream.
    pub fn bytes(&self) -> usize {
        match self {
            IoOutcome::Transferred(n) => *n,
            IoOutcome::WouldBlock | IoOutcome::Failed(_) => 0,
        }
    }

    pub fn is_would_block(&self) -> bool {
        matches!(self, IoOutcome::WouldBlock)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, IoOutcome::Failed(_))
    }

    /// Turns a hard failure into a [`NetError`].
    ///
    /// `Some(0)` is the peer shutting down; `None` is "nothing yet".
    pub fn into_result(self, endpoint: Endpoint) -> Result<Option<usize>, NetError> {
        match self {
            IoOutcome::Transferred(n) => Ok(Some(n)),
            IoOutcome::WouldBlock => Ok(None),
            IoOutcome::Failed(source) => Err(NetError::Io { endpoint, source }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Send,
    Recv,
}

/// Sends from `buffer` with one system call, waiting at most `deadline`.
pub fn send(handle: &mut ConnectionHandle, buffer: &[u8], deadline: Deadline) -> IoOutcome {
    let result = attempt(handle.stream(), Direction::Send, deadline, |mut stream| {
        stream.write(buffer)
    });
    let outcome = classify(result);

    match &outcome {
        IoOutcome::Transferred(n) if handle.traffic_logging() => trace!(
            "Sent {n}/{} bytes to {}: {}",
            buffer.len(),
            handle.endpoint(),
            preview(&buffer[..*n])
        ),
        IoOutcome::WouldBlock if handle.traffic_logging() => {
            trace!("Sending to {} would block after {deadline}", handle.endpoint())
        }
        IoOutcome::Failed(e) => error!("Sending to {} failed: {e}", handle.endpoint()),
        _ => {}
    }
    outcome
}

/// Receives into `buffer` with one system call, waiting at most `deadline`.
pub fn recv(handle: &mut ConnectionHandle, buffer: &mut [u8], deadline: Deadline) -> IoOutcome {
    let result = attempt(handle.stream(), Direction::Recv, deadline, |mut stream| {
        stream.read(&mut *buffer)
    });
    let outcome = classify(result);

    match &outcome {
        IoOutcome::Transferred(0) if handle.traffic_logging() => {
            trace!("{} closed its side of the connection", handle.endpoint())
        }
        IoOutcome::Transferred(n) if handle.traffic_logging() => trace!(
            "Received {n} bytes from {}: {}",
            handle.endpoint(),
            preview(&buffer[..*n])
        ),
        IoOutcome::WouldBlock if handle.traffic_logging() => {
            trace!("Nothing from {} within {deadline}", handle.endpoint())
        }
        IoOutcome::Failed(e) => error!("Receiving from {} failed: {e}", handle.endpoint()),
        _ => {}
    }
    outcome
}

/// Runs `op` once under `deadline`.
///
/// A zero deadline cannot go through `SO_SNDTIMEO`/`SO_RCVTIMEO`, where zero
/// means "block forever", so the socket is made non-blocking for that one call.
fn attempt<F>(stream: &TcpStream, direction: Direction, deadline: Deadline, op: F) -> io::Result<usize>
where
    F: FnOnce(&TcpStream) -> io::Result<usize>,
{
    let sock = SockRef::from(stream);

    if deadline.is_zero() {
        sock.set_nonblocking(true)?;
        let result = op(stream);
        return with_blocking_restored(result, sock.set_nonblocking(false));
    }

    let (secs, micros) = deadline.as_timeval_parts();
    let timeout = Duration::new(secs, micros * 1_000);
    match direction {
        Direction::Send => sock.set_write_timeout(Some(timeout))?,
        Direction::Recv => sock.set_read_timeout(Some(timeout))?,
    }

    op(stream)
}

/// A socket left non-blocking would turn every later deadline into an instant
/// `WouldBlock`, so a failed restore fails the attempt.
fn with_blocking_restored(result: io::Result<usize>, restored: io::Result<()>) -> io::Result<usize> {
    match restored {
        Ok(()) => result,
        Err(e) => {
            if let Ok(n) = result {
                warn!("Dropping {n} transferred bytes: restoring blocking mode failed");
            }
            Err(e)
        }
    }
}

fn classify(result: io::Result<usize>) -> IoOutcome {
    match result {
        Ok(n) => IoOutcome::Transferred(n),
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => IoOutcome::WouldBlock,
        Err(e) => IoOutcome::Failed(e),
    }
}

fn preview(data: &[u8]) -> String {
    if data.len() > TRAFFIC_PREVIEW_LEN {
        format!("{}...", hex::encode(&data[..TRAFFIC_PREVIEW_LEN]))
    } else {
        hex::encode(data)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
