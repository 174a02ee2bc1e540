//! # Shared Types Crate
//!
//! Types used by both SignCTRL link subsystems:
//!
//! - [`NodeAddress`]: a validator endpoint given as `[scheme://]host:port`,
//!   normalized once so every caller dials the same `host:port` pair.
//! - [`CancelSource`] / [`CancelSignal`]: the one-shot abort signal that the
//!   dialer (sc-01) and the block reader (sc-02) listen on.
//!
//! ## Design Principles
//!
//! - **Normalize at the edge**: scheme prefixes such as `tcp://` are stripped
//!   while parsing, never at the call site.
//! - **Subscribe, don't poll**: nothing in the workspace touches OS signals
//!   directly; adapters translate them into a [`CancelSource::cancel`] call.

pub mod address;
pub mod cancel;
pub mod errors;

pub use address::{strip_scheme, NodeAddress};
pub use cancel::{cancel_pair, CancelSignal, CancelSource};
pub use errors::AddressError;
