//! Iterative radix-2 Number-Theoretic-Transform butterflies over
//! [`Field65537`].
//!
//! [`NttTables`] precomputes the forward/inverse twiddle vectors and
//! the bit-reversal permutation for a fixed power-of-two transform size
//! and is shared by every transform of that size. The "lanes" variants
//! of [`NttTables::forward`]/[`NttTables::inverse`] run `width`
//! independent transforms side by side, one symbol's `width` lanes
//! stored contiguously (`data[i * width + lane]`); this is the layout
//! [`crate::rsi16`] transposes message blocks into so several blocks
//! can be encoded by the same pass over the twiddle tables.

use crate::{field65537::Field65537, Error};

// ======================================================================
// NttTables - PUBLIC

/// Precomputed twiddle vectors and bit-reversal permutation for
/// transforms of a fixed power-of-two size over [`Field65537`].
pub struct NttTables {
    n: usize,
    log_n: u32,
    /// `roots[i] = zeta^i` for `i` in `0..n`, where `zeta` has order `n`.
    roots: Box<[u32]>,
    /// `roots_inv[i] = zeta^-i`.
    roots_inv: Box<[u32]>,
    /// Bit-reversal permutation of `log_n` bits.
    rbo: Box<[u32]>,
}

impl NttTables {
    /// Builds twiddle/permutation tables for transforms of size `n`.
    ///
    /// `n` must be a power of two no larger than `65536`, so that a
    /// root of unity of order `n` exists (the multiplicative group of
    /// `GF(65537)` has order `65536`).
    pub fn new(field: &Field65537, n: usize) -> Result<Self, Error> {
        if n == 0 || (n & (n - 1)) != 0 || n > 65536 {
            return Err(Error::InvalidField {
                reason: "NTT size must be a power of two no larger than 65536",
            });
        }
        let log_n = n.trailing_zeros();

        // `zeta` has order exactly `n`: it's `primitive^(group_order / n)`,
        // and `group_order = 65536` is a multiple of every valid `n`.
        let zeta = field.exp(65536 / n);
        let zeta_inv = field.inv(zeta);

        let mut roots = vec![0u32; n];
        let mut roots_inv = vec![0u32; n];
        let mut r = 1u32;
        let mut r_inv = 1u32;
        for i in 0..n {
            roots[i] = r;
            roots_inv[i] = r_inv;
            r = field.mul(r, zeta);
            r_inv = field.mul(r_inv, zeta_inv);
        }
        debug_assert_eq!(r, 1, "zeta^n must wrap back to 1");
        if n > 1 {
            debug_assert_ne!(zeta, 1, "zeta must have order exactly n, not a divisor of it");
        }

        let rbo: Vec<u32> = (0..n as u32).map(|i| reverse_bits(i, log_n)).collect();

        Ok(Self {
            n,
            log_n,
            roots: roots.into_boxed_slice(),
            roots_inv: roots_inv.into_boxed_slice(),
            rbo: rbo.into_boxed_slice(),
        })
    }

    /// The transform size this table was built for.
    pub fn size(&self) -> usize {
        self.n
    }

    pub(crate) fn rbo(&self) -> &[u32] {
        &self.rbo
    }

    pub(crate) fn roots_inv(&self) -> &[u32] {
        &self.roots_inv
    }

    /// In-place forward transform (decimation-in-time Cooley-Tukey).
    ///
    /// `data` must have length exactly [`Self::size`].
    pub fn forward(&self, field: &Field65537, data: &mut [u32]) {
        self.forward_lanes(field, data, 1);
    }

    /// In-place inverse transform (decimation-in-frequency
    /// Gentleman-Sande), unnormalized (no division by `n`).
    ///
    /// `data` must have length exactly [`Self::size`]. Only
    /// `data[..end]` is guaranteed to hold the correct result.
    pub fn inverse(&self, field: &Field65537, data: &mut [u32], end: usize) {
        self.inverse_lanes(field, data, 1, end);
    }

    /// Forward transform over `width` interleaved lanes at once: symbol
    /// `i`'s `width` lanes live at `data[i * width .. i * width + width]`.
    ///
    /// `data` must have length exactly `size() * width`.
    pub fn forward_lanes(&self, field: &Field65537, data: &mut [u32], width: usize) {
        debug_assert_eq!(data.len(), self.n * width);
        copy_rbo_lanes(data, &self.rbo, width);

        let mut stride = 1;
        while stride < self.n {
            let step = self.n / (2 * stride);
            let block = stride * 2;
            let mut k = 0;
            while k < self.n {
                for j in 0..stride {
                    let w = self.roots[(j * step) % self.n];
                    let base_u = (k + j) * width;
                    let base_v = (k + j + stride) * width;
                    for lane in 0..width {
                        let u = data[base_u + lane];
                        let t = field.mul(w, data[base_v + lane]);
                        data[base_u + lane] = field.add(u, t);
                        data[base_v + lane] = field.sub(u, t);
                    }
                }
                k += block;
            }
            stride *= 2;
        }
    }

    /// Inverse transform over `width` interleaved lanes at once;
    /// guarantees only the first `end` symbols (i.e. `end * width`
    /// lanes) are correct afterwards.
    pub fn inverse_lanes(&self, field: &Field65537, data: &mut [u32], width: usize, end: usize) {
        debug_assert_eq!(data.len(), self.n * width);
        debug_assert!(end <= self.n);

        let mut stride = self.n / 2;
        while stride >= 1 {
            let step = self.n / (2 * stride);
            let block = stride * 2;
            let mut k = 0;
            while k < self.n {
                for j in 0..stride {
                    let w = self.roots_inv[(j * step) % self.n];
                    let base_u = (k + j) * width;
                    let base_v = (k + j + stride) * width;
                    for lane in 0..width {
                        let u = data[base_u + lane];
                        let v = data[base_v + lane];
                        data[base_u + lane] = field.add(u, v);
                        data[base_v + lane] = field.mul(field.sub(u, v), w);
                    }
                }
                k += block;
            }
            stride /= 2;
        }

        let mut out = vec![0u32; end * width];
        for i in 0..end {
            let src = self.rbo[i] as usize * width;
            let dst = i * width;
            out[dst..dst + width].copy_from_slice(&data[src..src + width]);
        }
        data[..end * width].copy_from_slice(&out);
    }
}

fn copy_rbo_lanes(data: &mut [u32], rbo: &[u32], width: usize) {
    let mut out = vec![0u32; data.len()];
    for (i, &src) in rbo.iter().enumerate() {
        let src = src as usize * width;
        let dst = i * width;
        out[dst..dst + width].copy_from_slice(&data[src..src + width]);
    }
    data.copy_from_slice(&out);
}

fn reverse_bits(mut x: u32, bits: u32) -> u32 {
    let mut r = 0u32;
    for _ in 0..bits {
        r = (r << 1) | (x & 1);
        x >>= 1;
    }
    r
}

// ======================================================================
// TESTS
