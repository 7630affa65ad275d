//! # varwin-predict
//!
//! Variant effect sequence engine: turns each genetic variant into a pair
//! of fixed-length one-hot sequence windows — one carrying the reference
//! allele, one the alternate — and streams them through a prediction
//! interface in fixed-size batches.
//!
//! ## Main components
//!
//! - [`compose_alt`] — derives the alternate-allele window from the
//!   reference window and the allele pair (substitution, insertion,
//!   deletion, oversized alternate).
//! - [`reconcile`] — checks the declared reference allele against the
//!   genome bases at the same span and corrects the window when they
//!   disagree.
//! - [`VariantEvaluator`] — the streaming batch driver.
//! - [`Predictor`] / [`Reporter`] — the consumed and produced interfaces
//!   at the pipeline boundary.

pub mod compose;
pub mod config;
pub mod driver;
pub mod errors;
pub mod predictor;
pub mod reconcile;
pub mod reporter;

// re-export things
pub use compose::*;
pub use config::*;
pub use driver::*;
pub use errors::*;
pub use predictor::*;
pub use reconcile::*;
pub use reporter::*;
