//! Shared value types for the profile-server link.
//!
//! Everything in here is plain data: endpoints, deadlines, the error taxonomy
//! and the configuration the front-end assembles. The socket work itself lives
//! in `profilenet-core`.

pub mod config;
pub mod error;
pub mod network;

pub use error::{AddressParseError, NetError};
pub use network::deadline::Deadline;
pub use network::endpoint::Endpoint;
