use std::io;
use std::net::AddrParseError;
use std::num::ParseIntError;

use thiserror::Error;

use crate::network::deadline::Deadline;
use crate::network::endpoint::Endpoint;

/// Why an `A.B.C.D:port` string could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("missing ':' between address and port in '{input}'")]
    MissingSeparator { input: String },

    #[error("more than one ':' in '{input}'")]
    UnexpectedSeparator { input: String },

    #[error("invalid IPv4 address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },

    #[error("port '{port}' is not a decimal number")]
    InvalidPort { port: String },

    #[error("port '{port}' does not fit in 16 bits: {source}")]
    PortOutOfRange {
        port: String,
        #[source]
        source: ParseIntError,
    },
}

/// Failures of the socket operations.
///
/// A timed send or receive that runs out of time is not in here: that is
/// `IoOutcome::WouldBlock` in the core crate.
#[derive(Debug, Error)]
pub enum NetError {
    #[error(transparent)]
    AddressParse(#[from] AddressParseError),

    #[error("creating socket for {endpoint} failed: {source}")]
    SocketCreate {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },

    #[error("connecting to {endpoint} failed: {source}")]
    Connect {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },

    #[error("connecting to {endpoint} did not complete within {deadline}")]
    ConnectTimeout { endpoint: Endpoint, deadline: Deadline },

    #[error("i/o with {endpoint} failed: {source}")]
    Io {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },
}

impl NetError {
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            NetError::AddressParse(_) => None,
            NetError::SocketCreate { endpoint, .. }
            | NetError::Connect { endpoint, .. }
            | NetError::ConnectTimeout { endpoint, .. }
            | NetError::Io { endpoint, .. } => Some(*endpoint),
        }
    }

    /// The OS error behind this failure, if there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            NetError::SocketCreate { source, .. }
            | NetError::Connect { source, .. }
            | NetError::Io { source, .. } => Some(source),
            NetError::AddressParse(_) | NetError::ConnectTimeout { .. } => None,
        }
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
