//! # Endpoint Model
//!
//! Identifies a remote TCP listener as a numeric IPv4 address and port.
//!
//! Endpoints arrive either pre-split as `(address, port)` pairs or as a combined
//! string such as `127.0.0.1:1234`, which is what the host process stores in its
//! options. This module owns the parsing of the combined form.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

use crate::error::AddressParseError;

const SEPARATOR: char = ':';

/// A remote TCP endpoint.
///
/// `address` is kept in host byte order, so `127.0.0.1` is `0x7F00_0001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub address: u32,
    pub port: u16,
}

impl Endpoint {
    pub const fn new(address: u32, port: u16) -> Self {
        Self { address, port }
    }

    pub fn from_ipv4(address: Ipv4Addr, port: u16) -> Self {
        Self::new(u32::from(address), port)
    }

    /// Parses an `A.B.C.D:port` string.
    pub fn parse(s: &str) -> Result<Self, AddressParseError> {
        let (address, port) = split_ipv4_str(s)?;
        Ok(Self::from_ipv4(address, port))
    }

    pub fn ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.address)
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.ipv4(), self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.ipv4(), self.port)
    }
}

impl FromStr for Endpoint {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<SocketAddrV4> for Endpoint {
    fn from(addr: SocketAddrV4) -> Self {
        Self::from_ipv4(*addr.ip(), addr.port())
    }
}

impl From<Endpoint> for SocketAddrV4 {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.socket_addr()
    }
}

impl From<Endpoint> for SocketAddr {
    fn from(endpoint: Endpoint) -> Self {
        SocketAddr::V4(endpoint.socket_addr())
    }
}

/// Splits `A.B.C.D:port` into its address and port.
///
/// The input must contain exactly one `:`. The address part has to be strict
/// dotted-decimal IPv4 and the port part a plain decimal number that fits in
/// 16 bits. Signs, whitespace and hex are rejected rather than guessed at.
pub fn split_ipv4_str(s: &str) -> Result<(Ipv4Addr, u16), AddressParseError> {
    let Some((address_str, port_str)) = s.split_once(SEPARATOR) else {
        return Err(AddressParseError::MissingSeparator {
            input: s.to_string(),
        });
    };

    if port_str.contains(SEPARATOR) {
        return Err(AddressParseError::UnexpectedSeparator {
            input: s.to_string(),
        });
    }

    let address = address_str
        .parse::<Ipv4Addr>()
        .map_err(|source| AddressParseError::InvalidAddress {
            address: address_str.to_string(),
            source,
        })?;

    let port = parse_port(port_str)?;

    Ok((address, port))
}

fn parse_port(port_str: &str) -> Result<u16, AddressParseError> {
    if port_str.is_empty() || !port_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressParseError::InvalidPort {
            port: port_str.to_string(),
        });
    }

    port_str
        .parse::<u16>()
        .map_err(|source| AddressParseError::PortOutOfRange {
            port: port_str.to_string(),
            source,
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
