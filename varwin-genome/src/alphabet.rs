//! DNA alphabet and per-base one-hot rows.

use ndarray::ArrayView1;

/// Canonical base order for the one-hot columns.
pub const BASES: [u8; 4] = *b"ACGT";

/// Filler written into padded or unrecognized positions.
pub const UNKNOWN_BASE: u8 = b'N';

/// Row for the unknown base: uniform mass over the four bases.
pub const UNKNOWN_ROW: [f32; 4] = [0.25; 4];

/// A lookup table that maps ASCII bases (upper- or lowercase) to their
/// column index; everything else maps to the out-of-alphabet sentinel.
const BASE_INDEX: [u8; 256] = {
    let mut arr = [4u8; 256];
    arr[b'A' as usize] = 0;
    arr[b'a' as usize] = 0;
    arr[b'C' as usize] = 1;
    arr[b'c' as usize] = 1;
    arr[b'G' as usize] = 2;
    arr[b'g' as usize] = 2;
    arr[b'T' as usize] = 3;
    arr[b't' as usize] = 3;
    arr
};

/// Column index of a base, or `None` for anything outside `ACGT`.
pub fn base_index(base: u8) -> Option<usize> {
    match BASE_INDEX[base as usize] {
        4 => None,
        i => Some(i as usize),
    }
}

pub fn is_unknown(base: u8) -> bool {
    base_index(base).is_none()
}

/// One-hot encode a single base; unknown bases get the uniform row.
pub fn one_hot_row(base: u8) -> [f32; 4] {
    match base_index(base) {
        Some(i) => {
            let mut row = [0.0; 4];
            row[i] = 1.0;
            row
        }
        None => UNKNOWN_ROW,
    }
}

/// Decode a one-hot row back to its base. Anything that is not an exact
/// one-hot row decodes to [`UNKNOWN_BASE`].
pub fn row_to_base(row: ArrayView1<f32>) -> u8 {
    for (i, &v) in row.iter().enumerate() {
        if v == 1.0 {
            return BASES[i];
        }
    }
    UNKNOWN_BASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_index_is_case_insensitive() {
        assert_eq!(base_index(b'A'), Some(0));
        assert_eq!(base_index(b'a'), Some(0));
        assert_eq!(base_index(b't'), Some(3));
        assert_eq!(base_index(b'N'), None);
        assert_eq!(base_index(b'-'), None);
    }

    #[test]
    fn one_hot_rows_round_trip() {
        for &base in BASES.iter() {
            let row = one_hot_row(base);
            assert_eq!(row_to_base(arr1(&row).view()), base);
        }
    }

    #[test]
    fn unknown_bases_get_the_uniform_row() {
        assert_eq!(one_hot_row(b'N'), UNKNOWN_ROW);
        assert_eq!(one_hot_row(b'X'), UNKNOWN_ROW);
        assert_eq!(row_to_base(arr1(&UNKNOWN_ROW).view()), UNKNOWN_BASE);
    }
}
