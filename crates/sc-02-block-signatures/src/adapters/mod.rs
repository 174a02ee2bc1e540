//! # Adapters Layer (Hexagonal Architecture)
//!
//! reqwest-backed block source.

mod http;

pub use http::HttpBlockFetcher;
