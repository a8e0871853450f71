//! Error-locator root search.
//!
//! Given an error-locator polynomial `Lambda(X)` (highest-degree-first)
//! and a block length `n`, finds every position `i` in `0..n` for which
//! `Lambda(a^-i) == 0`; such positions are exactly the error locations
//! (Chien search).

use crate::field256::{Field256, WideWord};

/// Evaluates `locator` at `a^-i` for every `i` in `0..n`, one Horner
/// evaluation per position.
pub(crate) fn find_roots_basic(f: &Field256, locator: &[u8], n: usize) -> Vec<usize> {
    (0..n)
        .filter(|&i| f.eval(locator, inverse_power(f, i)) == 0)
        .collect()
}

/// Packs `W::LANES` positions' inverse powers per word and evaluates all
/// of them in one pass over `locator`.
pub(crate) fn find_roots_wide<W: WideWord>(f: &Field256, locator: &[u8], n: usize) -> Vec<usize> {
    let lanes = W::LANES;
    let mut positions = Vec::new();

    let mut i = 0;
    while i < n {
        let chunk_len = lanes.min(n - i);
        let mut chunk = vec![0u8; lanes];
        for (k, slot) in chunk.iter_mut().enumerate().take(chunk_len) {
            *slot = inverse_power(f, i + k);
        }

        let xs: W = WideWord::from_lanes(&chunk);
        let result = f.eval_wide(locator, xs);

        let mut lane_out = vec![0u8; lanes];
        result.to_lanes(&mut lane_out);
        for k in 0..chunk_len {
            if lane_out[k] == 0 {
                positions.push(i + k);
            }
        }

        i += chunk_len;
    }
    positions
}

/// `a^-i`, i.e. `a^((255 - i) mod 255)`.
fn inverse_power(f: &Field256, i: usize) -> u8 {
    f.exp((255 - i % 255) % 255)
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_roots_and_no_others() {
        let f = Field256::new(2, 0x11d).unwrap();
        // Lambda(X) = (X - a^-3)(X - a^-10), roots at positions 3 and 10.
        let r0 = f.exp((255 - 3) % 255);
        let r1 = f.exp((255 - 10) % 255);
        let locator = vec![1u8, f.add(r0, r1), f.mul(r0, r1)];

        let basic = find_roots_basic(&f, &locator, 40);
        assert_eq!(basic, vec![3, 10]);

        let wide: Vec<usize> = find_roots_wide::<u32>(&f, &locator, 40);
        assert_eq!(wide, basic);
        let wide16: Vec<usize> = find_roots_wide::<u128>(&f, &locator, 40);
        assert_eq!(wide16, basic);
    }
}
