//! Systematic Reed-Solomon codes over `GF(256)`.

mod decoder;
mod encoder;
mod roots;
mod syndrome;

use crate::{field256::Field256, generator::Generator, Error};

/// A systematic Reed-Solomon code over `GF(256)`.
///
/// `block_len = message_len + ecc_len`, with `block_len <= 255` (every
/// symbol, including the check symbols, fits one byte). Codewords are
/// laid out as `message || ecc`, `message` first.
pub struct RS256 {
    field: Field256,
    generator: Generator<Field256>,
    message_len: usize,
    ecc_len: usize,
    slicing: encoder::SlicingTables,
}

impl RS256 {
    /// Builds an encoder/decoder for the given dimensions.
    ///
    /// At least two of `block_len`, `message_len`, `ecc_len` must be
    /// given; if all three are given they must be consistent
    /// (`block_len == message_len + ecc_len`). `ecc_len` must be in
    /// `1..=254` and `block_len` in `ecc_len+1..=255`.
    ///
    /// `primitive`/`poly` select the field, exactly as in
    /// [`Field256::new`].
    pub fn new(
        block_len: Option<u8>,
        message_len: Option<u8>,
        ecc_len: Option<u8>,
        primitive: u8,
        poly: u16,
    ) -> Result<Self, Error> {
        let (block_len, message_len, ecc_len) = resolve_dimensions(block_len, message_len, ecc_len)?;

        if !(1..=254).contains(&ecc_len) {
            return Err(Error::InvalidConfig {
                reason: "ecc_len must be in 1..=254",
            });
        }
        if block_len <= ecc_len || block_len > 255 {
            return Err(Error::InvalidConfig {
                reason: "block_len must be in ecc_len+1..=255",
            });
        }

        let field = Field256::new(primitive, poly)?;
        let roots: Vec<u8> = (0..ecc_len).map(|i| field.pow(primitive, i)).collect();
        let generator = Generator::new(&field, roots);
        let slicing = encoder::SlicingTables::build(&field, generator.tail());

        Ok(Self {
            field,
            generator,
            message_len,
            ecc_len,
            slicing,
        })
    }

    /// Block length (`message_len + ecc_len`).
    pub fn block_len(&self) -> usize {
        self.message_len + self.ecc_len
    }

    /// Message length (data symbols per block).
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// ECC length (check symbols per block).
    pub fn ecc_len(&self) -> usize {
        self.ecc_len
    }

    /// Encodes one block in place: `codeword[..codeword.len() -
    /// ecc_len]` is read as the message, the trailing `ecc_len` bytes
    /// are overwritten with the computed check symbols. The buffer does
    /// not need to match `block_len()` exactly -- the message length is
    /// derived from whatever length is given, the same way
    /// [`Self::encode_blocks`] calls into the same encoder per chunk.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `codeword.len() <
    /// ecc_len()`.
    pub fn encode(&self, codeword: &mut [u8]) -> Result<(), Error> {
        if codeword.len() < self.ecc_len {
            return Err(Error::DimensionMismatch {
                expected: self.ecc_len,
                got: codeword.len(),
            });
        }
        let message_len = codeword.len() - self.ecc_len;
        let (message, ecc) = codeword.split_at_mut(message_len);
        let computed = self.slicing.encode(&self.field, message, self.generator.tail());
        ecc.copy_from_slice(&computed);
        Ok(())
    }

    /// Encodes `input` as consecutive message chunks of size `block_len
    /// - ecc_len` (default `block_len` is this encoder's own, i.e.
    /// chunks of `message_len` bytes), returning the concatenated
    /// codewords. A short final chunk is encoded as a shorter block
    /// with the same `ecc_len`, not zero-padded up to `message_len`.
    ///
    /// Panics if an explicit `block_len` override does not exceed
    /// `ecc_len()`.
    pub fn encode_blocks(&self, input: &[u8], block_len: Option<usize>) -> Vec<u8> {
        let block_len = block_len.unwrap_or_else(|| self.block_len());
        let chunk_len = block_len
            .checked_sub(self.ecc_len)
            .filter(|&c| c > 0)
            .expect("block_len override must be greater than ecc_len");
        let mut out = Vec::with_capacity(
            ((input.len() + chunk_len - 1) / chunk_len) * (chunk_len + self.ecc_len),
        );
        for chunk in input.chunks(chunk_len) {
            let ecc = self.slicing.encode(&self.field, chunk, self.generator.tail());
            out.extend_from_slice(chunk);
            out.extend_from_slice(&ecc);
        }
        out
    }

    /// Decodes one block in place, correcting up to `ecc_len / 2`
    /// byte errors at unknown positions. Returns `true` if the block is
    /// now valid (including the no-errors case); on `false`,
    /// `codeword` is left unmodified if no correction was applied, or
    /// may have had a wrong, uncorrectable candidate applied if
    /// verification subsequently failed.
    pub fn decode(&self, codeword: &mut [u8]) -> bool {
        decoder::decode(&self.field, codeword, &self.generator.roots)
    }

    /// Decodes one block in place with `positions` (indices into
    /// `codeword`, `0` is the first symbol) flagged as erasures: known
    /// error locations with unknown magnitude. Up to `ecc_len` erasures
    /// can be corrected on their own, or fewer erasures combined with
    /// additional unflagged errors up to the usual `2*errors +
    /// erasures <= ecc_len` bound.
    pub fn decode_erasures(&self, codeword: &mut [u8], positions: &[u16]) -> bool {
        let n = codeword.len();
        if positions.len() > self.ecc_len || positions.iter().any(|&p| p as usize >= n) {
            return false;
        }
        let positions: Vec<usize> = positions.iter().map(|&p| n - 1 - p as usize).collect();
        decoder::decode_erasures(&self.field, codeword, &self.generator.roots, &positions)
    }
}

fn resolve_dimensions(
    block_len: Option<u8>,
    message_len: Option<u8>,
    ecc_len: Option<u8>,
) -> Result<(usize, usize, usize), Error> {
    let bad = || {
        Error::InvalidConfig {
            reason: "at least two of block_len, message_len, ecc_len must be given and consistent",
        }
    };
    match (block_len, message_len, ecc_len) {
        (Some(b), Some(m), Some(e)) => {
            if b as usize != m as usize + e as usize {
                return Err(bad());
            }
            Ok((b as usize, m as usize, e as usize))
        }
        (Some(b), Some(m), None) => {
            let e = (b as usize).checked_sub(m as usize).ok_or_else(bad)?;
            Ok((b as usize, m as usize, e))
        }
        (Some(b), None, Some(e)) => {
            let m = (b as usize).checked_sub(e as usize).ok_or_else(bad)?;
            Ok((b as usize, m, e as usize))
        }
        (None, Some(m), Some(e)) => Ok((m as usize + e as usize, m as usize, e as usize)),
        _ => Err(bad()),
    }
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_without_errors() {
        let rs = RS256::new(Some(255), None, Some(32), 2, 0x11d).unwrap();
        let message: Vec<u8> = (0..rs.message_len()).map(|i| (i * 7 + 1) as u8).collect();
        let mut codeword = message.clone();
        codeword.resize(rs.block_len(), 0);
        rs.encode(&mut codeword).unwrap();

        assert!(rs.decode(&mut codeword));
        assert_eq!(&codeword[..rs.message_len()], &message[..]);
    }

    #[test]
    fn corrects_exactly_at_half_ecc_len_but_not_one_beyond() {
        // ecc_len=32 over a 223-byte message: up to 16 errors must always
        // correct; 17 must never silently succeed with the wrong message.
        let rs = RS256::new(Some(255), Some(223), None, 2, 0x11d).unwrap();
        let message: Vec<u8> = (0..rs.message_len()).map(|i| (i * 17 + 3) as u8).collect();
        let mut clean = message.clone();
        clean.resize(rs.block_len(), 0);
        rs.encode(&mut clean).unwrap();

        let mut sixteen = clean.clone();
        for i in 0..16 {
            sixteen[i * 13] ^= 0xa5;
        }
        assert!(rs.decode(&mut sixteen));
        assert_eq!(&sixteen[..rs.message_len()], &message[..]);

        let mut seventeen = clean.clone();
        for i in 0..17 {
            seventeen[i * 13] ^= 0xa5;
        }
        let decoded = rs.decode(&mut seventeen);
        if decoded {
            assert_ne!(&seventeen[..rs.message_len()], &message[..]);
        }
    }

    #[test]
    fn corrects_errors_after_corruption() {
        let rs = RS256::new(None, Some(200), Some(16), 2, 0x11d).unwrap();
        let message: Vec<u8> = (0..rs.message_len()).map(|i| (i * 3 + 5) as u8).collect();
        let mut codeword = message.clone();
        codeword.resize(rs.block_len(), 0);
        rs.encode(&mut codeword).unwrap();
        let original = codeword.clone();

        for idx in [0usize, 50, 100, 150, 199, 210] {
            codeword[idx] ^= 0x3c;
        }

        assert!(rs.decode(&mut codeword));
        assert_eq!(codeword, original);
    }

    #[test]
    fn encode_blocks_emits_shorter_final_block_unpadded() {
        let rs = RS256::new(None, Some(10), Some(4), 2, 0x11d).unwrap();
        let input = vec![1u8, 2, 3];
        let out = rs.encode_blocks(&input, None);
        // A 3-byte final chunk with ecc_len=4 produces a 7-byte block,
        // not a full 14-byte block padded up to message_len.
        assert_eq!(out.len(), input.len() + rs.ecc_len());
        assert_eq!(&out[..input.len()], &input[..]);
    }

    #[test]
    fn encode_blocks_honors_explicit_block_len_override() {
        let rs = RS256::new(None, Some(10), Some(4), 2, 0x11d).unwrap();
        let input: Vec<u8> = (0..20u32).map(|i| i as u8).collect();
        // Override to a smaller block_len than the encoder's own: chunks
        // of 6 message bytes + 4 ecc bytes per block (20 bytes -> 6,6,6,2).
        let out = rs.encode_blocks(&input, Some(10));
        assert_eq!(out.len(), 3 * (6 + 4) + (2 + 4));

        let mut want = Vec::new();
        for chunk in input.chunks(6) {
            let ecc = encoder::encode_basic(&rs.field, chunk, rs.generator.tail());
            want.extend_from_slice(chunk);
            want.extend_from_slice(&ecc);
        }
        assert_eq!(out, want);
    }

    #[test]
    #[should_panic(expected = "block_len override must be greater than ecc_len")]
    fn encode_blocks_rejects_block_len_not_exceeding_ecc_len() {
        let rs = RS256::new(None, Some(10), Some(4), 2, 0x11d).unwrap();
        rs.encode_blocks(&[1, 2, 3], Some(4));
    }

    #[test]
    fn encode_accepts_any_buffer_length_at_least_ecc_len() {
        let rs = RS256::new(None, Some(10), Some(4), 2, 0x11d).unwrap();
        let message: Vec<u8> = (0..6u32).map(|i| (i * 5 + 1) as u8).collect();

        // A 6-byte message plus ecc_len=4 check bytes, shorter than
        // block_len() (14), must still encode/decode correctly.
        let mut codeword = message.clone();
        codeword.resize(message.len() + rs.ecc_len(), 0);
        rs.encode(&mut codeword).unwrap();
        assert!(rs.decode(&mut codeword));
        assert_eq!(&codeword[..message.len()], &message[..]);

        // Below ecc_len is still rejected.
        let mut too_short = vec![0u8; rs.ecc_len() - 1];
        assert!(rs.encode(&mut too_short).is_err());
    }

    #[test]
    fn decode_erasures_rejects_out_of_range_position() {
        let rs = RS256::new(Some(50), None, Some(8), 2, 0x11d).unwrap();
        let mut codeword = vec![0u8; rs.block_len()];
        assert!(!rs.decode_erasures(&mut codeword, &[50]));
    }

    #[test]
    fn decode_erasures_rejects_too_many_positions() {
        let rs = RS256::new(Some(50), None, Some(8), 2, 0x11d).unwrap();
        let mut codeword = vec![0u8; rs.block_len()];
        let positions: Vec<u16> = (0..9).collect();
        assert!(!rs.decode_erasures(&mut codeword, &positions));
    }

    #[test]
    fn rejects_inconsistent_dimensions() {
        assert!(RS256::new(Some(100), Some(90), Some(20), 2, 0x11d).is_err());
    }

    #[test]
    fn decode_erasures_corrects_flagged_positions() {
        let rs = RS256::new(Some(100), None, Some(10), 2, 0x11d).unwrap();
        let message: Vec<u8> = (0..rs.message_len()).map(|i| (i * 13 + 2) as u8).collect();
        let mut codeword = message.clone();
        codeword.resize(rs.block_len(), 0);
        rs.encode(&mut codeword).unwrap();
        let original = codeword.clone();

        let erased_indices: [u16; 6] = [2, 20, 40, 60, 80, 99];
        for &idx in &erased_indices {
            codeword[idx as usize] ^= 0x42;
        }

        assert!(rs.decode_erasures(&mut codeword, &erased_indices));
        assert_eq!(codeword, original);
    }
}
