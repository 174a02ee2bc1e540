//! # Domain Layer
//!
//! Block query inputs, the decoded envelope and its commit signatures.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
