pub mod handle;
pub mod tcp;
pub mod transport;
