//! # varwin-core
//!
//! Core data model for varwin: variant records, strand handling, and the
//! window geometry used to anchor fixed-length sequence windows on a
//! variant.

pub mod errors;
pub mod models;

pub use errors::*;
pub use models::*;
