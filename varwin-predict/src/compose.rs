//! Alternate-allele window composition.
//!
//! Given the positive-strand reference window for a variant, build the
//! matching alternate-allele window so that the two differ only where the
//! allele differs. Splice offsets are always computed in positive-strand
//! window coordinates; any reverse-strand flip happens later, uniformly,
//! on both windows.

use ndarray::{Array2, Axis, concatenate, s};

use varwin_core::{Strand, WindowGeometry};
use varwin_genome::{GenomeAccessor, complement_encoding, sequence_to_encoding};

use crate::errors::EvaluatorError;

/// The kind of edit an alternate allele applies to its window, classified
/// once per variant and dispatched from a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlleleEdit {
    /// Alternate longer than the whole window; it fills the window by
    /// itself and no reference bases are retained.
    OversizedAlt,
    /// Equal-length replacement at the centered span.
    Substitution,
    /// Longer replacement spliced in, then symmetrically truncated back to
    /// the window length.
    Insertion,
    /// Shorter replacement; both flanks are re-fetched from the genome so
    /// the net shift stays symmetric around the variant.
    Deletion,
}

impl AlleleEdit {
    pub fn classify(ref_len: usize, alt_len: usize, seq_len: usize) -> Self {
        if alt_len > seq_len {
            AlleleEdit::OversizedAlt
        } else if alt_len == ref_len {
            AlleleEdit::Substitution
        } else if alt_len > ref_len {
            AlleleEdit::Insertion
        } else {
            AlleleEdit::Deletion
        }
    }
}

/// `*` and `-` alternate symbols mark a pure deletion.
fn normalize_alt(alt: &str) -> &str {
    if alt == "*" || alt == "-" { "" } else { alt }
}

/// Center-truncate an encoding down to `seq_len` rows, dropping the floor
/// of the excess from the left and the remainder from the right.
fn truncate_centered(enc: Array2<f32>, seq_len: usize) -> Array2<f32> {
    if enc.nrows() <= seq_len {
        return enc;
    }
    let trunc_start = (enc.nrows() - seq_len) / 2;
    enc.slice(s![trunc_start..trunc_start + seq_len, ..]).to_owned()
}

/// Build the alternate-allele window for a variant.
///
/// `ref_window` is the positive-strand reference window spanning
/// `[window_start, window_end)`; `pos` is the 1-based variant position.
/// The result always has exactly `seq_len` rows.
#[allow(clippy::too_many_arguments)]
pub fn compose_alt<G: GenomeAccessor>(
    genome: &G,
    geometry: WindowGeometry,
    chrom: &str,
    pos: u64,
    ref_allele: &str,
    alt_allele: &str,
    window_start: i64,
    window_end: i64,
    ref_window: &Array2<f32>,
    strand: Strand,
) -> Result<Array2<f32>, EvaluatorError> {
    let alt = normalize_alt(alt_allele);
    let seq_len = geometry.seq_len();
    let ref_len = ref_allele.len();
    let alt_len = alt.len();

    let composed = match AlleleEdit::classify(ref_len, alt_len, seq_len) {
        AlleleEdit::OversizedAlt => sequence_to_encoding(&alt.as_bytes()[..seq_len]),
        AlleleEdit::Substitution | AlleleEdit::Insertion => {
            let mut alt_enc = sequence_to_encoding(alt.as_bytes());
            if strand.is_reverse() {
                // complement only; positional reversal happens later,
                // uniformly on both windows
                alt_enc = complement_encoding(alt_enc.view());
            }
            let (span_start, span_end) = geometry.centered_span(ref_len);
            let spliced = concatenate![
                Axis(0),
                ref_window.slice(s![..span_start, ..]),
                alt_enc.view(),
                ref_window.slice(s![span_end.., ..])
            ];
            truncate_centered(spliced, seq_len)
        }
        AlleleEdit::Deletion => {
            let pos = pos as i64;
            let ref_len = ref_len as i64;
            let alt_len = alt_len as i64;
            let left_start = window_start - ref_len / 2 + alt_len / 2;
            let left_end = (pos + 1).max(left_start);
            let right_start = pos + 1 + ref_len;
            let right_end =
                (window_end + (ref_len + 1) / 2 - (alt_len + 1) / 2).max(right_start);

            // flank ranges can invert for windows shorter than the allele
            // shift; the clamps above keep them non-negative and the
            // truncation below restores the window length
            let mut seq = genome.raw_sequence_for_range(chrom, left_start, left_end, true)?;
            seq.extend_from_slice(alt.as_bytes());
            seq.extend(genome.raw_sequence_for_range(chrom, right_start, right_end, true)?);
            truncate_centered(sequence_to_encoding(&seq), seq_len)
        }
    };

    if composed.nrows() != seq_len {
        return Err(EvaluatorError::WindowLengthMismatch {
            rows: composed.nrows(),
            expected: seq_len,
        });
    }
    Ok(composed)
}
