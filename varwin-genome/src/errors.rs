use thiserror::Error;

/// Conditions under which a coordinate range cannot be resolved to
/// sequence. Both variants mean the variant cannot be windowed at all;
/// callers route them to exclusion reporting rather than aborting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenomeError {
    #[error("unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("range [{start}, {end}) does not overlap {chrom} (length {len})")]
    OutOfBounds {
        chrom: String,
        start: i64,
        end: i64,
        len: usize,
    },
}
