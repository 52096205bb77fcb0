use std::io;
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::os::fd::{AsFd, BorrowedFd};

use profilenet_common::Endpoint;
use tracing::debug;

/// An open TCP connection, owned by whoever called [`connect`](super::tcp::connect).
///
/// The socket is released exactly once: either by [`close`](Self::close), which
/// consumes the handle, or when the handle is dropped on an early return.
/// There is no way to duplicate it.
#[derive(Debug)]
pub struct ConnectionHandle {
    stream: TcpStream,
    endpoint: Endpoint,
    log_traffic: bool,
}

impl ConnectionHandle {
    pub(crate) fn new(stream: TcpStream, endpoint: Endpoint) -> Self {
        Self {
            stream,
            endpoint,
            log_traffic: false,
        }
    }

    /// Adopts an already connected IPv4 stream, e.g. one returned by `accept`.
    pub fn from_stream(stream: TcpStream) -> io::Result<Self> {
        match stream.peer_addr()? {
            SocketAddr::V4(peer) => Ok(Self::new(stream, Endpoint::from(peer))),
            SocketAddr::V6(peer) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{peer} is not an IPv4 peer"),
            )),
        }
    }

    /// The remote end of this connection.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Turns on trace-level logging of every payload moved through this handle.
    pub fn set_traffic_logging(&mut self, enabled: bool) {
        self.log_traffic = enabled;
    }

    pub fn traffic_logging(&self) -> bool {
        self.log_traffic
    }

    /// Half-closes the connection: the peer sees end-of-stream, receiving still works.
    pub fn shutdown_write(&self) -> io::Result<()> {
        self.stream.shutdown(Shutdown::Write)
    }

    /// Hands the raw stream over, e.g. to wrap it in TLS.
    pub fn into_stream(self) -> TcpStream {
        self.stream
    }

    pub fn close(self) {
        debug!("Closing connection to {}", self.endpoint);
    }

    pub(crate) fn stream(&self) -> &TcpStream {
        &self.stream
    }
}

impl AsFd for ConnectionHandle {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.stream.as_fd()
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
