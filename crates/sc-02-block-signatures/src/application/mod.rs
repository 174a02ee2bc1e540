//! # Application Layer
//!
//! Block signature service orchestrating source and decoder.

pub mod service;

pub use service::BlockSignatureService;
