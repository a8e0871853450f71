//! Syndrome decoding: Berlekamp-Massey key-equation solver, Chien search
//! and Forney error-magnitude evaluation, plus erasure-only decoding via
//! a known-locator variant of the same machinery.

use super::roots;
use crate::field256::Field256;

/// Picks the wide-word lane width used for syndrome computation and root
/// search, mirroring `encoder::dispatch_stride`'s size-based selection:
/// a small `ecc_len` doesn't have enough roots/candidates to fill a wide
/// register, so a narrower width avoids wasted padding lanes.
fn dispatch_lanes(ecc_len: usize) -> usize {
    match ecc_len {
        1..=4 => 4,
        5..=8 => 8,
        _ => 16,
    }
}

fn compute_syndromes(f: &Field256, codeword: &[u8], roots_vec: &[u8]) -> Vec<u8> {
    match dispatch_lanes(roots_vec.len()) {
        4 => super::syndrome::compute_wide::<u32>(f, codeword, roots_vec),
        8 => super::syndrome::compute_wide::<u64>(f, codeword, roots_vec),
        _ => super::syndrome::compute_wide::<u128>(f, codeword, roots_vec),
    }
}

fn find_error_positions(f: &Field256, locator_hi: &[u8], n: usize, ecc_len: usize) -> Vec<usize> {
    match dispatch_lanes(ecc_len) {
        4 => roots::find_roots_wide::<u32>(f, locator_hi, n),
        8 => roots::find_roots_wide::<u64>(f, locator_hi, n),
        _ => roots::find_roots_wide::<u128>(f, locator_hi, n),
    }
}

/// Runs Berlekamp-Massey on `syndromes` (`syndromes[i] = D(a^i)` for `i`
/// in `0..ecc_len`), returning the error-locator polynomial `Lambda`,
/// lowest-degree-first (`Lambda[0] == 1` always), and the number of
/// errors it implies (`Lambda.len() - 1`).
///
/// Lowest-degree-first is the conventional layout for this algorithm;
/// callers that need `Lambda` for [`crate::poly`]/[`roots`] (which are
/// highest-degree-first) must reverse it first.
pub(crate) fn berlekamp_massey(f: &Field256, syndromes: &[u8]) -> Vec<u8> {
    let n = syndromes.len();
    let mut c = vec![1u8]; // current locator
    let mut b = vec![1u8]; // locator at the last length change
    let mut l = 0usize; // degree of c
    let mut m = 1usize; // steps since b was recorded
    let mut b_disc = 1u8; // discrepancy at the time b was recorded

    for i in 0..n {
        let mut d = syndromes[i];
        for j in 1..=l {
            if j < c.len() {
                d = f.add(d, f.mul(c[j], syndromes[i - j]));
            }
        }

        if d == 0 {
            m += 1;
            continue;
        }

        let coef = f.div(d, b_disc);
        if 2 * l <= i {
            let t = c.clone();
            if c.len() < b.len() + m {
                c.resize(b.len() + m, 0);
            }
            for (k, &bk) in b.iter().enumerate() {
                c[k + m] = f.sub(c[k + m], f.mul(coef, bk));
            }
            l = i + 1 - l;
            b = t;
            b_disc = d;
            m = 1;
        } else {
            if c.len() < b.len() + m {
                c.resize(b.len() + m, 0);
            }
            for (k, &bk) in b.iter().enumerate() {
                c[k + m] = f.sub(c[k + m], f.mul(coef, bk));
            }
            m += 1;
        }
    }

    c.truncate(l + 1);
    c
}

/// Builds the error-locator polynomial directly from known erasure
/// positions: `Lambda(X) = prod (1 - a^pos * X)`, lowest-degree-first.
/// Used by erasure decoding, where positions are given rather than
/// solved for.
pub(crate) fn locator_from_positions(f: &Field256, positions: &[usize]) -> Vec<u8> {
    let mut c = vec![1u8];
    for &pos in positions {
        let root = f.exp(pos);
        let mut next = vec![0u8; c.len() + 1];
        for (i, &ci) in c.iter().enumerate() {
            next[i] = f.add(next[i], ci);
            next[i + 1] = f.sub(next[i + 1], f.mul(ci, root));
        }
        c = next;
    }
    c
}

/// Evaluates a lowest-degree-first polynomial at `x` via Horner, walking
/// from the highest-degree coefficient down.
fn eval_low(f: &Field256, c: &[u8], x: u8) -> u8 {
    let mut acc = 0u8;
    for &ci in c.iter().rev() {
        acc = f.add(f.mul(acc, x), ci);
    }
    acc
}

/// Formal derivative of a lowest-degree-first polynomial: coefficient of
/// `X^(i-1)` is `i * c[i]`, which in characteristic 2 keeps only the
/// odd-degree terms unchanged and drops the even ones.
fn derivative_low(c: &[u8]) -> Vec<u8> {
    if c.len() <= 1 {
        return Vec::new();
    }
    (1..c.len()).map(|i| if i % 2 == 1 { c[i] } else { 0 }).collect()
}

/// `Omega(X) = (S(X) * Lambda(X)) mod X^ecc_len`, lowest-degree-first,
/// truncated to the first `ecc_len` terms of the convolution (higher
/// terms are not needed by Forney's formula).
fn error_evaluator(f: &Field256, syndromes: &[u8], locator: &[u8]) -> Vec<u8> {
    let full = crate::poly::mul(f, syndromes, locator);
    let len = syndromes.len().min(full.len());
    full[..len].to_vec()
}

/// Given error positions (`0..n`, `0` is the first symbol of the whole
/// codeword including its ECC tail) and the syndromes, computes the
/// magnitude to XOR into each position via Forney's formula, returning
/// `None` if the locator/syndromes are inconsistent (uncorrectable).
fn forney_magnitudes(
    f: &Field256,
    syndromes: &[u8],
    locator_low: &[u8],
    positions: &[usize],
) -> Option<Vec<u8>> {
    let omega = error_evaluator(f, syndromes, locator_low);
    let lambda_prime = derivative_low(locator_low);

    let mut magnitudes = Vec::with_capacity(positions.len());
    for &pos in positions {
        let x = f.exp(pos);
        let x_inv = f.exp((255 - pos % 255) % 255);

        let denom = eval_low(f, &lambda_prime, x_inv);
        if denom == 0 {
            return None;
        }
        let num = f.mul(x, eval_low(f, &omega, x_inv));
        magnitudes.push(f.div(num, denom));
    }
    Some(magnitudes)
}

/// Full syndrome decode: computes syndromes, solves for the error
/// locations and magnitudes, and corrects `codeword` in place. Returns
/// `true` if decoding succeeded (including the no-errors case).
pub(crate) fn decode(f: &Field256, codeword: &mut [u8], roots_vec: &[u8]) -> bool {
    let syndromes = compute_syndromes(f, codeword, roots_vec);
    if syndromes.iter().all(|&s| s == 0) {
        return true;
    }

    let locator_low = berlekamp_massey(f, &syndromes);
    let num_errors = locator_low.len() - 1;
    if num_errors == 0 {
        return false;
    }

    let locator_hi: Vec<u8> = locator_low.iter().rev().copied().collect();
    let positions = find_error_positions(f, &locator_hi, codeword.len(), roots_vec.len());
    if positions.len() != num_errors {
        return false;
    }

    let Some(magnitudes) = forney_magnitudes(f, &syndromes, &locator_low, &positions) else {
        return false;
    };

    apply_corrections(codeword, &positions, &magnitudes);
    verify(f, codeword, roots_vec)
}

/// Decodes with a known set of erasure positions (indices into
/// `codeword`, `0` is the first symbol). Falls back to locating any
/// additional, unflagged errors via Berlekamp-Massey seeded with the
/// known locator, matching the error-and-erasure decoding used when
/// positions are only a subset of the true errors.
pub(crate) fn decode_erasures(
    f: &Field256,
    codeword: &mut [u8],
    roots_vec: &[u8],
    positions: &[usize],
) -> bool {
    let syndromes = compute_syndromes(f, codeword, roots_vec);
    if syndromes.iter().all(|&s| s == 0) {
        return true;
    }
    if positions.is_empty() {
        return decode(f, codeword, roots_vec);
    }

    let locator_low = locator_from_positions(f, positions);
    let Some(magnitudes) = forney_magnitudes(f, &syndromes, &locator_low, positions) else {
        return false;
    };

    apply_corrections(codeword, positions, &magnitudes);
    verify(f, codeword, roots_vec)
}

fn apply_corrections(codeword: &mut [u8], positions: &[usize], magnitudes: &[u8]) {
    let n = codeword.len();
    for (&pos, &mag) in positions.iter().zip(magnitudes) {
        codeword[n - 1 - pos] ^= mag;
    }
}

fn verify(f: &Field256, codeword: &[u8], roots_vec: &[u8]) -> bool {
    compute_syndromes(f, codeword, roots_vec).iter().all(|&s| s == 0)
}

// ======================================================================
// TESTS
