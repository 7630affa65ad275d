/// Geometry of a fixed-length window anchored on a variant.
///
/// A window of `seq_len` bases keeps `start_radius` bases before the anchor
/// and `end_radius` bases after it; for odd lengths the extra base falls
/// after the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    seq_len: usize,
    start_radius: usize,
    end_radius: usize,
}

impl WindowGeometry {
    pub fn new(seq_len: usize) -> Self {
        let start_radius = seq_len / 2;
        WindowGeometry {
            seq_len,
            start_radius,
            end_radius: seq_len - start_radius,
        }
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    pub fn start_radius(&self) -> usize {
        self.start_radius
    }

    pub fn end_radius(&self) -> usize {
        self.end_radius
    }

    /// 0-based anchor: the 1-based variant position shifted to the midpoint
    /// of the reference allele.
    pub fn anchor(&self, pos: u64, ref_len: usize) -> i64 {
        pos as i64 - 1 + (ref_len / 2) as i64
    }

    /// Genome coordinate range `[start, end)` of the window around `anchor`.
    /// Signed so that windows near a chromosome edge can run negative.
    pub fn range(&self, anchor: i64) -> (i64, i64) {
        (
            anchor - self.start_radius as i64,
            anchor + self.end_radius as i64,
        )
    }

    /// Offsets `[start, end)` of a centered span of `len` bases inside the
    /// window. The midpoint shifts down by one for even window lengths;
    /// that asymmetry keeps spans aligned with the window fetch and must
    /// not be changed.
    pub fn centered_span(&self, len: usize) -> (usize, usize) {
        let mut mid = self.seq_len / 2;
        if self.seq_len % 2 == 0 {
            mid -= 1;
        }
        let start = mid.saturating_sub(len / 2);
        (start, (start + len).min(self.seq_len))
    }
}
