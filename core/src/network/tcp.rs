use std::io;
use std::net::TcpStream;
use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use profilenet_common::{Deadline, Endpoint, NetError};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, error};

use crate::network::handle::ConnectionHandle;

/// Returns `true` if a TCP handshake with `endpoint` completes within `timeout`.
///
/// The connection is never kept; the socket is closed before returning.
/// A zero timeout looks at the socket once and does not wait.
pub fn is_connectable(endpoint: Endpoint, timeout: Deadline) -> bool {
    match check_connectable(endpoint, timeout) {
        Ok(()) => {
            debug!("{endpoint} accepted a connection within {timeout}");
            true
        }
        // Already reported where the socket was created.
        Err(NetError::SocketCreate { .. }) => false,
        Err(e) => {
            debug!("{endpoint} is not reachable: {e}");
            false
        }
    }
}

/// Like [`is_connectable`], for an `A.B.C.D:port` string.
pub fn is_connectable_str(endpoint: &str, timeout: Deadline) -> bool {
    match Endpoint::parse(endpoint) {
        Ok(endpoint) => is_connectable(endpoint, timeout),
        Err(e) => {
            error!("Invalid endpoint '{endpoint}': {e}");
            false
        }
    }
}

/// Performs the reachability handshake and says why it failed.
///
/// Returns [`NetError::SocketCreate`] when no socket could be opened,
/// [`NetError::ConnectTimeout`] when the handshake is still pending after
/// `timeout`, and [`NetError::Connect`] when the peer refused or the network
/// reported an error.
pub fn check_connectable(endpoint: Endpoint, timeout: Deadline) -> Result<(), NetError> {
    let socket = open_socket(endpoint)?;
    let result = handshake(&socket, endpoint, timeout);
    drop(socket);
    result
}

fn handshake(socket: &Socket, endpoint: Endpoint, timeout: Deadline) -> Result<(), NetError> {
    let connect_err = |source: io::Error| NetError::Connect { endpoint, source };

    socket.set_nonblocking(true).map_err(connect_err)?;

    match socket.connect(&SockAddr::from(endpoint.socket_addr())) {
        Ok(()) => return Ok(()),
        Err(e) if is_in_progress(&e) => {}
        Err(e) => return Err(connect_err(e)),
    }

    if !wait_writable(socket, timeout).map_err(connect_err)? {
        return Err(NetError::ConnectTimeout {
            endpoint,
            deadline: timeout,
        });
    }

    match socket.take_error() {
        Ok(None) => Ok(()),
        Ok(Some(e)) | Err(e) => Err(connect_err(e)),
    }
}

/// Blocks until `socket` is writable or `timeout` runs out.
fn wait_writable(socket: &Socket, timeout: Deadline) -> io::Result<bool> {
    let mut fds = [PollFd::new(socket.as_fd(), PollFlags::POLLOUT)];
    let timeout = PollTimeout::try_from(timeout.as_millis()).unwrap_or(PollTimeout::MAX);

    let ready = poll(&mut fds, timeout).map_err(io::Error::from)?;
    Ok(ready > 0)
}

fn is_in_progress(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock || err.raw_os_error() == Some(Errno::EINPROGRESS as i32)
}

/// Opens a connection to `endpoint` with the OS default connect timeout.
///
/// No retries. Failures are logged here with the endpoint and OS error.
pub fn connect(endpoint: Endpoint) -> Result<ConnectionHandle, NetError> {
    let socket = open_socket(endpoint)?;

    if let Err(source) = socket.connect(&SockAddr::from(endpoint.socket_addr())) {
        error!("Connecting to {endpoint} failed: {source}");
        return Err(NetError::Connect { endpoint, source });
    }

    debug!("Connected to {endpoint}");
    Ok(ConnectionHandle::new(TcpStream::from(socket), endpoint))
}

/// Like [`connect`], for an `A.B.C.D:port` string.
pub fn connect_str(endpoint: &str) -> Result<ConnectionHandle, NetError> {
    let parsed = Endpoint::parse(endpoint).inspect_err(|e| {
        error!("Invalid endpoint '{endpoint}': {e}");
    })?;
    connect(parsed)
}

fn open_socket(endpoint: Endpoint) -> Result<Socket, NetError> {
    Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).map_err(|source| {
        error!("Creating socket for {endpoint} failed: {source}");
        NetError::SocketCreate { endpoint, source }
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
