//! Syndrome computation.
//!
//! A syndrome is the evaluation of the received codeword's polynomial
//! at a root of the generator; all `ecc_len` syndromes are zero exactly
//! when the codeword is free of errors.

use crate::field256::{Field256, WideWord};

/// Evaluates `codeword` at every generator root, one Horner evaluation
/// per root.
pub(crate) fn compute_basic(f: &Field256, codeword: &[u8], roots: &[u8]) -> Vec<u8> {
    roots.iter().map(|&r| f.eval(codeword, r)).collect()
}

/// Packs `W::LANES` roots per word and evaluates all of them in one
/// pass over `codeword`, extracting lanes back into a flat syndrome
/// vector.
pub(crate) fn compute_wide<W: WideWord>(f: &Field256, codeword: &[u8], roots: &[u8]) -> Vec<u8> {
    let lanes = W::LANES;
    let mut out = vec![0u8; roots.len()];

    let mut i = 0;
    while i < roots.len() {
        let chunk_len = lanes.min(roots.len() - i);
        let mut chunk = vec![0u8; lanes];
        chunk[..chunk_len].copy_from_slice(&roots[i..i + chunk_len]);

        let xs: W = WideWord::from_lanes(&chunk);
        let result = f.eval_wide(codeword, xs);

        let mut lane_out = vec![0u8; lanes];
        result.to_lanes(&mut lane_out);
        out[i..i + chunk_len].copy_from_slice(&lane_out[..chunk_len]);

        i += chunk_len;
    }
    out
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_matches_basic() {
        let f = Field256::new(2, 0x11d).unwrap();
        let roots: Vec<u8> = (0..13u32).map(|i| f.pow(2, i as usize)).collect();
        let codeword: Vec<u8> = (0..50u32).map(|i| (i * 7 + 1) as u8).collect();

        let basic = compute_basic(&f, &codeword, &roots);
        let wide4: Vec<u8> = compute_wide::<u32>(&f, &codeword, &roots);
        let wide8: Vec<u8> = compute_wide::<u64>(&f, &codeword, &roots);
        let wide16: Vec<u8> = compute_wide::<u128>(&f, &codeword, &roots);

        assert_eq!(basic, wide4);
        assert_eq!(basic, wide8);
        assert_eq!(basic, wide16);
    }
}
