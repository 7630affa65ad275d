//! # varwin-genome
//!
//! Sequence alphabet, one-hot encodings, complement transforms, and the
//! genome accessor used to retrieve coordinate-addressed windows from an
//! assembled reference genome.

pub mod alphabet;
pub mod encoding;
pub mod errors;
pub mod genome;

// re-export things
pub use alphabet::*;
pub use encoding::*;
pub use errors::*;
pub use genome::*;
