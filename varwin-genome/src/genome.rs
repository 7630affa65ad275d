//! Coordinate-addressed access to an assembled reference genome.

use std::collections::HashMap;

use ndarray::Array2;

use crate::alphabet::{UNKNOWN_BASE, is_unknown};
use crate::encoding::sequence_to_encoding;
use crate::errors::GenomeError;

/// Coordinate access to reference sequence and its encodings.
///
/// Ranges are 0-based half-open, in signed coordinates so callers can ask
/// for windows that run off a chromosome edge. With `pad` set, positions
/// outside the chromosome are filled with [`UNKNOWN_BASE`]; without it any
/// out-of-range position is an error. A range that does not overlap the
/// chromosome at all is an error even when padding, so callers can tell a
/// padded edge window from a window that misses the sequence entirely.
pub trait GenomeAccessor {
    /// Raw bases for `[start, end)` on `chrom`, uppercased.
    fn raw_sequence_for_range(
        &self,
        chrom: &str,
        start: i64,
        end: i64,
        pad: bool,
    ) -> Result<Vec<u8>, GenomeError>;

    /// One-hot encoding for `[start, end)` plus a flag set when any
    /// retrieved base is unknown.
    fn encoding_for_range(
        &self,
        chrom: &str,
        start: i64,
        end: i64,
        pad: bool,
    ) -> Result<(Array2<f32>, bool), GenomeError> {
        let seq = self.raw_sequence_for_range(chrom, start, end, pad)?;
        let contains_unknown = seq.iter().any(|&b| is_unknown(b));
        Ok((sequence_to_encoding(&seq), contains_unknown))
    }
}

/// Genome held entirely in memory, built from already-loaded
/// (name, sequence) records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGenome {
    sequences: HashMap<String, Vec<u8>>,
}

impl InMemoryGenome {
    pub fn from_records<I, N, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        let sequences = records
            .into_iter()
            .map(|(name, seq)| (name.into(), seq.as_ref().to_ascii_uppercase()))
            .collect();
        InMemoryGenome { sequences }
    }
}

impl GenomeAccessor for InMemoryGenome {
    fn raw_sequence_for_range(
        &self,
        chrom: &str,
        start: i64,
        end: i64,
        pad: bool,
    ) -> Result<Vec<u8>, GenomeError> {
        let seq = self
            .sequences
            .get(chrom)
            .ok_or_else(|| GenomeError::UnknownChromosome(chrom.to_string()))?;
        let len = seq.len() as i64;

        if start >= end {
            return Ok(Vec::new());
        }
        let out_of_bounds = || GenomeError::OutOfBounds {
            chrom: chrom.to_string(),
            start,
            end,
            len: seq.len(),
        };
        if start >= len || end <= 0 {
            return Err(out_of_bounds());
        }
        if !pad && (start < 0 || end > len) {
            return Err(out_of_bounds());
        }

        let mut out = Vec::with_capacity((end - start) as usize);
        for i in start..end {
            out.push(if (0..len).contains(&i) {
                seq[i as usize]
            } else {
                UNKNOWN_BASE
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn genome() -> InMemoryGenome {
        InMemoryGenome::from_records([("chr1", "acgtACGT"), ("chr2", "TTTT")])
    }

    #[test]
    fn fetches_uppercased_sequence() {
        let seq = genome().raw_sequence_for_range("chr1", 2, 6, false).unwrap();
        assert_eq!(seq, b"GTAC");
    }

    #[test]
    fn pads_past_both_edges() {
        let seq = genome().raw_sequence_for_range("chr1", -2, 2, true).unwrap();
        assert_eq!(seq, b"NNAC");
        let seq = genome().raw_sequence_for_range("chr1", 6, 10, true).unwrap();
        assert_eq!(seq, b"GTNN");
    }

    #[test]
    fn unpadded_out_of_range_is_an_error() {
        let err = genome()
            .raw_sequence_for_range("chr1", -2, 2, false)
            .unwrap_err();
        assert!(matches!(err, GenomeError::OutOfBounds { .. }));
    }

    #[test]
    fn non_overlapping_ranges_fail_even_with_padding() {
        let err = genome()
            .raw_sequence_for_range("chr2", 10, 14, true)
            .unwrap_err();
        assert!(matches!(err, GenomeError::OutOfBounds { .. }));
        let err = genome()
            .raw_sequence_for_range("chr2", -6, -2, true)
            .unwrap_err();
        assert!(matches!(err, GenomeError::OutOfBounds { .. }));
    }

    #[test]
    fn unknown_chromosome_is_an_error() {
        let err = genome()
            .raw_sequence_for_range("chrZ", 0, 4, true)
            .unwrap_err();
        assert_eq!(err, GenomeError::UnknownChromosome("chrZ".to_string()));
    }

    #[test]
    fn empty_ranges_yield_empty_sequence() {
        let seq = genome().raw_sequence_for_range("chr1", 4, 4, true).unwrap();
        assert_eq!(seq, b"");
        let seq = genome().raw_sequence_for_range("chr1", 6, 4, true).unwrap();
        assert_eq!(seq, b"");
    }

    #[test]
    fn encoding_for_range_flags_unknown_bases() {
        let (enc, contains_unknown) = genome()
            .encoding_for_range("chr1", -1, 3, true)
            .unwrap();
        assert_eq!(enc.nrows(), 4);
        assert!(contains_unknown);

        let (enc, contains_unknown) = genome().encoding_for_range("chr1", 0, 4, true).unwrap();
        assert_eq!(enc.nrows(), 4);
        assert!(!contains_unknown);
    }
}
