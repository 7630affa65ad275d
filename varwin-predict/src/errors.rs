use thiserror::Error;

use varwin_genome::GenomeError;

/// Failures while windowing a variant or dispatching a batch.
///
/// The `Genome` variant means the variant cannot be windowed (unknown
/// chromosome, window off the sequence) and is routed to exclusion
/// reporting by the driver; the remaining variants are contract
/// violations and abort the run.
#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error(transparent)]
    Genome(#[from] GenomeError),

    #[error("composed window has {rows} positions, expected {expected}")]
    WindowLengthMismatch { rows: usize, expected: usize },

    #[error("score matrix has {rows} rows, expected {expected}")]
    ScoreShapeMismatch { rows: usize, expected: usize },
}
