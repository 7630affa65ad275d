//! Reconciliation of the declared reference allele against genome content.

use ndarray::{Array2, s};

use varwin_core::WindowGeometry;
use varwin_genome::encoding_to_sequence;

/// Outcome of comparing a declared reference allele with the genome bases
/// at the same span.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// True iff the genome agreed with the declared allele.
    pub matched: bool,
    /// Window to use downstream; on mismatch the declared allele has been
    /// substituted in.
    pub window: Array2<f32>,
    /// Readable genome bases at the disputed span, for diagnostics.
    /// `None` when matched.
    pub genome_bases: Option<String>,
}

impl Reconciliation {
    fn matched(window: Array2<f32>) -> Self {
        Reconciliation {
            matched: true,
            window,
            genome_bases: None,
        }
    }
}

/// Compare `declared_ref` (already strand-adjusted) against `window` and
/// return the window to use downstream. The declared allele always wins:
/// on mismatch it overwrites the genome content and the discrepancy is
/// reported, never aborted on. Re-running on a corrected window reports a
/// match and changes nothing.
pub fn reconcile(
    geometry: WindowGeometry,
    declared_ref: &Array2<f32>,
    mut window: Array2<f32>,
) -> Reconciliation {
    let ref_len = declared_ref.nrows();
    let seq_len = geometry.seq_len();

    if ref_len == 0 {
        return Reconciliation::matched(window);
    }

    if ref_len < seq_len {
        let (span_start, span_end) = geometry.centered_span(ref_len);
        let genome_bases = {
            let genome_span = window.slice(s![span_start..span_end, ..]);
            if genome_span == declared_ref.view() {
                return Reconciliation::matched(window);
            }
            String::from_utf8_lossy(&encoding_to_sequence(genome_span)).into_owned()
        };
        window
            .slice_mut(s![span_start..span_end, ..])
            .assign(declared_ref);
        return Reconciliation {
            matched: false,
            window,
            genome_bases: Some(genome_bases),
        };
    }

    // The declared allele spans the whole window; align the allele's own
    // encoding with the window radii and compare against the full window.
    let ref_start = ref_len as i64 / 2 - geometry.start_radius() as i64 - 1;
    let ref_start = ref_start.clamp(0, (ref_len - seq_len) as i64) as usize;
    let ref_slice = declared_ref.slice(s![ref_start..ref_start + seq_len, ..]);
    if window == ref_slice {
        return Reconciliation::matched(window);
    }
    let genome_bases = String::from_utf8_lossy(&encoding_to_sequence(window.view())).into_owned();
    Reconciliation {
        matched: false,
        window: ref_slice.to_owned(),
        genome_bases: Some(genome_bases),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varwin_genome::sequence_to_encoding;

    fn enc(seq: &str) -> Array2<f32> {
        sequence_to_encoding(seq.as_bytes())
    }

    fn decode(enc: &Array2<f32>) -> String {
        String::from_utf8(encoding_to_sequence(enc.view())).unwrap()
    }

    #[test]
    fn matched_when_genome_agrees() {
        let geometry = WindowGeometry::new(4);
        let recon = reconcile(geometry, &enc("C"), enc("ACGT"));
        assert!(recon.matched);
        assert_eq!(decode(&recon.window), "ACGT");
        assert_eq!(recon.genome_bases, None);
    }

    #[test]
    fn mismatch_substitutes_the_declared_allele() {
        let geometry = WindowGeometry::new(4);
        let recon = reconcile(geometry, &enc("G"), enc("ACGT"));
        assert!(!recon.matched);
        assert_eq!(decode(&recon.window), "AGGT");
        assert_eq!(recon.genome_bases.as_deref(), Some("C"));
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let geometry = WindowGeometry::new(4);
        let first = reconcile(geometry, &enc("G"), enc("ACGT"));
        assert!(!first.matched);
        let second = reconcile(geometry, &enc("G"), first.window.clone());
        assert!(second.matched);
        assert_eq!(second.window, first.window);
    }

    #[test]
    fn empty_reference_is_trivially_matched() {
        let geometry = WindowGeometry::new(4);
        let recon = reconcile(geometry, &enc(""), enc("ACGT"));
        assert!(recon.matched);
    }

    #[test]
    fn long_reference_replaces_the_whole_window() {
        // allele longer than the window: compare against the allele's own
        // slice aligned with the radii
        let geometry = WindowGeometry::new(4);
        let recon = reconcile(geometry, &enc("AACGTT"), enc("ACGT"));
        assert!(!recon.matched);
        assert_eq!(decode(&recon.window), "AACG");
        assert_eq!(recon.genome_bases.as_deref(), Some("ACGT"));

        let again = reconcile(geometry, &enc("AACGTT"), recon.window);
        assert!(again.matched);
    }

    #[test]
    fn long_reference_slice_stays_in_bounds_at_equal_lengths() {
        let geometry = WindowGeometry::new(4);
        let recon = reconcile(geometry, &enc("ACGT"), enc("ACGT"));
        assert!(recon.matched);
        assert_eq!(decode(&recon.window), "ACGT");
    }
}
