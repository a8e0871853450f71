//! Systematic Reed-Solomon code over `GF(65537)`, built on the
//! Number-Theoretic Transform in [`crate::ntt`].
//!
//! Unlike [`crate::rs256::RS256`] this is encode-only: there is no
//! closed-form decoder for the 16-bit NTT path in this crate (see the
//! crate-level Non-goals).

mod simd;

use crate::{field65537::Field65537, ntt::NttTables, Error};

/// A systematic Reed-Solomon code over `GF(65537)`, operating on
/// 16-bit symbols.
///
/// `block_size` (`N`) is a power of two; `ecc_len` (`L`) must be even,
/// divide `N`, and be less than `N`. A codeword is `N` symbols:
/// `message` (`N - L` symbols) followed by `ecc` (`L` symbols).
pub struct RSi16 {
    field: Field65537,
    ntt: NttTables,
    /// `mix[j]`, length `ecc_len`: shapes the inverse-transform input
    /// so the replicated, inverse-transformed vector's first `ecc_len`
    /// positions are exactly the systematic ECC symbols.
    mix: Box<[u32]>,
    n: usize,
    ecc_len: usize,
    /// `1 / n`, precomputed since every encode needs it once.
    n_inv: u32,
}

impl RSi16 {
    /// Builds an encoder for the given dimensions.
    ///
    /// `block_size` must be a power of two in `2..=65536`. `ecc_len`
    /// must be even, nonzero, less than `block_size`, and divide
    /// `block_size` (so the replication step in [`Self::encode`] splits
    /// evenly). `primitive` must be a primitive root of `65537`, as in
    /// [`Field65537::new`].
    pub fn new(block_size: usize, ecc_len: usize, primitive: u32) -> Result<Self, Error> {
        if block_size < 2 || (block_size & (block_size - 1)) != 0 || block_size > 65536 {
            return Err(Error::InvalidConfig {
                reason: "block_size must be a power of two in 2..=65536",
            });
        }
        if ecc_len == 0 || ecc_len % 2 != 0 || ecc_len >= block_size {
            return Err(Error::InvalidConfig {
                reason: "ecc_len must be even, nonzero, and less than block_size",
            });
        }
        if block_size % ecc_len != 0 {
            return Err(Error::InvalidConfig {
                reason: "ecc_len must divide block_size",
            });
        }

        let field = Field65537::new(primitive)?;
        let ntt = NttTables::new(&field, block_size)?;
        let n_inv = field.inv(block_size as u32 % 65537);
        let mix = build_mix(&field, &ntt, block_size, ecc_len, n_inv);

        Ok(Self {
            field,
            ntt,
            mix,
            n: block_size,
            ecc_len,
            n_inv,
        })
    }

    /// Block size (`N`), the fixed codeword length in symbols.
    pub fn block_size(&self) -> usize {
        self.n
    }

    /// ECC length (`L`), the number of check symbols per codeword.
    pub fn ecc_len(&self) -> usize {
        self.ecc_len
    }

    /// Message length (`N - L`), the number of data symbols per codeword.
    pub fn message_len(&self) -> usize {
        self.n - self.ecc_len
    }

    /// Encodes one block in place: `codeword[..message_len()]` is read
    /// as the message, `codeword[message_len()..]` is overwritten with
    /// the computed check symbols.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `codeword.len() !=
    /// block_size()`.
    pub fn encode(&self, codeword: &mut [u16]) -> Result<(), Error> {
        if codeword.len() != self.n {
            return Err(Error::DimensionMismatch {
                expected: self.n,
                got: codeword.len(),
            });
        }
        let msg_len = self.message_len();
        let mut buf = vec![0u32; self.n];
        for (dst, &src) in buf[..msg_len].iter_mut().zip(codeword.iter()) {
            *dst = src as u32;
        }

        let ecc = self.encode_core(&mut buf);
        for (dst, &src) in codeword[msg_len..].iter_mut().zip(ecc) {
            *dst = (src % 65536) as u16;
        }
        Ok(())
    }

    /// Encodes `input` as consecutive `message_len()`-symbol blocks (the
    /// last block is zero-padded if `input`'s length isn't a multiple
    /// of it), returning the concatenated `block_size()`-symbol
    /// codewords serialized as big-endian `u16` bytes.
    ///
    /// Internally dispatches the widest SIMD-lane path the encoder's
    /// dimensions and the block count admit (see [`crate::rsi16::simd`]),
    /// falling back to [`Self::encode`] for the final, smaller-than-one-
    /// lane-group remainder.
    pub fn encode_blocks(&self, input: &[u16]) -> Vec<u8> {
        simd::encode_blocks(self, input)
    }

    /// Runs the five-step NTT encode pipeline (forward transform, mix,
    /// replicate, pruned inverse transform, scale) on a single,
    /// already-zero-padded `N`-symbol buffer, returning the `ecc_len`
    /// check values (still full field elements, not yet narrowed to
    /// `u16`).
    fn encode_core(&self, buf: &mut [u32]) -> Vec<u32> {
        debug_assert_eq!(buf.len(), self.n);
        self.ntt.forward(&self.field, buf);

        for (c, &m) in buf[..self.ecc_len].iter_mut().zip(self.mix.iter()) {
            *c = self.field.mul(*c, m);
        }
        replicate(buf, self.ecc_len, self.n / self.ecc_len);

        self.ntt.inverse(&self.field, buf, self.ecc_len);

        buf[..self.ecc_len]
            .iter()
            .map(|&c| self.field.mul(c, self.n_inv))
            .collect()
    }
}

/// Copies `buf[..block_len]` into each of the `blocks - 1` remaining
/// `block_len`-sized slots of `buf`.
pub(crate) fn replicate(buf: &mut [u32], block_len: usize, blocks: usize) {
    for b in 1..blocks {
        let (head, tail) = buf.split_at_mut(b * block_len);
        tail[..block_len].copy_from_slice(&head[..block_len]);
    }
}

/// Builds the mix vector: `mix[j] = -(roots_inv[rbo[n - ecc_len]])^j / n`.
fn build_mix(
    field: &Field65537,
    ntt: &NttTables,
    n: usize,
    ecc_len: usize,
    n_inv: u32,
) -> Box<[u32]> {
    let base = ntt.roots_inv()[ntt.rbo()[n - ecc_len] as usize];

    let mut mix = vec![0u32; ecc_len];
    let mut pow = 1u32;
    for slot in mix.iter_mut() {
        *slot = field.mul(field.sub(0, pow), n_inv);
        pow = field.mul(pow, base);
    }
    mix.into_boxed_slice()
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_block_size() {
        assert!(RSi16::new(200, 16, 3).is_err());
    }

    #[test]
    fn rejects_odd_ecc_len() {
        assert!(RSi16::new(256, 15, 3).is_err());
    }

    #[test]
    fn rejects_ecc_len_not_dividing_block_size() {
        assert!(RSi16::new(256, 24, 3).is_err());
    }

    #[test]
    fn rejects_ecc_len_ge_block_size() {
        assert!(RSi16::new(16, 16, 3).is_err());
    }

    #[test]
    fn encode_preserves_message_and_fills_ecc() {
        let rs = RSi16::new(256, 16, 3).unwrap();
        let mut codeword = vec![0u16; rs.block_size()];
        for (i, slot) in codeword[..rs.message_len()].iter_mut().enumerate() {
            *slot = (i * 37 + 5) as u16;
        }
        let message = codeword[..rs.message_len()].to_vec();

        rs.encode(&mut codeword).unwrap();

        assert_eq!(&codeword[..rs.message_len()], &message[..]);
        // Not every ECC run is nonzero, but an all-distinct-input
        // message practically never collapses the whole tail to zero.
        assert!(codeword[rs.message_len()..].iter().any(|&x| x != 0));
    }

    #[test]
    fn encode_rejects_wrong_length() {
        let rs = RSi16::new(256, 16, 3).unwrap();
        let mut codeword = vec![0u16; 100];
        assert!(rs.encode(&mut codeword).is_err());
    }

    #[test]
    fn encode_is_deterministic() {
        let rs = RSi16::new(128, 8, 3).unwrap();
        let message: Vec<u16> = (0..rs.message_len()).map(|i| (i * 17 + 1) as u16).collect();

        let mut a = message.clone();
        a.resize(rs.block_size(), 0);
        rs.encode(&mut a).unwrap();

        let mut b = message.clone();
        b.resize(rs.block_size(), 0);
        rs.encode(&mut b).unwrap();

        assert_eq!(a, b);
    }
}
