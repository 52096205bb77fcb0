//! Blocking TCP plumbing for talking to a profile server.
//!
//! * [`network::tcp`] answers "is the server there?" and opens connections.
//! * [`network::transport`] moves bytes over an open connection, one bounded
//!   system call at a time.
//! * [`network::handle`] owns the socket between those two.
//!
//! Nothing here spawns threads or retries. Every call returns within its
//! deadline (or, for [`network::tcp::connect`], the OS connect timeout) and
//! reports failures through `tracing` before handing them back.

pub mod network;

pub use network::handle::ConnectionHandle;
pub use network::tcp::{check_connectable, connect, connect_str, is_connectable, is_connectable_str};
pub use network::transport::{IoOutcome, recv, send};
