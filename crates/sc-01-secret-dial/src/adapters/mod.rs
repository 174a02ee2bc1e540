//! # Adapters Layer (Hexagonal Architecture)
//!
//! Concrete connector and signal source for production use.

mod signals;
mod tcp;

pub use signals::OsSignalSource;
pub use tcp::TcpConnector;
