//! Whole-sequence one-hot encodings and complement transforms.

use ndarray::{Array2, ArrayView2, s};

use crate::alphabet::{one_hot_row, row_to_base};

/// One-hot encode a sequence: one row per base, columns ordered A, C, G, T.
pub fn sequence_to_encoding(seq: &[u8]) -> Array2<f32> {
    let mut enc = Array2::zeros((seq.len(), 4));
    for (i, &base) in seq.iter().enumerate() {
        let row = one_hot_row(base);
        for (j, &v) in row.iter().enumerate() {
            enc[[i, j]] = v;
        }
    }
    enc
}

/// Decode an encoding back to readable bases, mostly for diagnostics.
pub fn encoding_to_sequence(enc: ArrayView2<f32>) -> Vec<u8> {
    enc.rows().into_iter().map(row_to_base).collect()
}

/// Base-pair complement without positional reversal. Under A, C, G, T
/// column order the complement of a one-hot row is the row reversed.
pub fn complement_encoding(enc: ArrayView2<f32>) -> Array2<f32> {
    enc.slice(s![.., ..;-1]).to_owned()
}

/// Reverse complement: complement every position and reverse their order.
/// Applying it twice is the identity.
pub fn reverse_complement_encoding(enc: ArrayView2<f32>) -> Array2<f32> {
    enc.slice(s![..;-1, ..;-1]).to_owned()
}
