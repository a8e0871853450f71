//! SIMD-lane dispatch for [`super::RSi16::encode_blocks`].
//!
//! Instead of encoding one block at a time, `width` independent blocks
//! are transposed into lane-interleaved form (symbol `i` of lane `j`
//! at offset `i * width + j`) and pushed through the same
//! [`crate::ntt::NttTables::forward_lanes`]/[`crate::ntt::NttTables::inverse_lanes`]
//! pass together, so every twiddle-table lookup and field operation
//! works on `width` values at once instead of one. [`best_width`]
//! queries the host once to pick the widest lane group worth forming;
//! [`encode_blocks`] then processes greedily decreasing widths
//! (`16, 8, 4`), falling back to [`super::RSi16::encode`] one block at
//! a time for whatever remainder is smaller than the narrowest group.

use super::{replicate, RSi16};

const WIDTHS: [usize; 3] = [16, 8, 4];

/// Widest lane group this encoder will attempt to form on the current
/// host. Lane arithmetic itself is portable (plain `u32` loops, no
/// target-specific intrinsics), so this only decides how aggressively
/// to batch; it never affects the result, only how much of
/// [`WIDTHS`] [`encode_blocks`] bothers trying before it reaches the
/// always-available width of `1`.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn best_width() -> usize {
    if cfg!(feature = "avx2") && std::is_x86_feature_detected!("avx2") {
        16
    } else {
        8
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn best_width() -> usize {
    4
}

/// Encodes `input` as consecutive `message_len`-symbol blocks (the last
/// zero-padded), returning the concatenated codewords as big-endian
/// `u16` bytes.
pub(super) fn encode_blocks(rs: &RSi16, input: &[u16]) -> Vec<u8> {
    let msg_len = rs.message_len();
    if msg_len == 0 {
        return Vec::new();
    }

    let messages: Vec<Vec<u16>> = input
        .chunks(msg_len)
        .map(|chunk| {
            let mut m = vec![0u16; msg_len];
            m[..chunk.len()].copy_from_slice(chunk);
            m
        })
        .collect();

    let mut out = Vec::with_capacity(messages.len() * rs.block_size() * 2);
    let widest = best_width();
    let mut i = 0;

    for &width in WIDTHS.iter() {
        if width > widest {
            continue;
        }
        while messages.len() - i >= width {
            let group: Vec<&[u16]> = messages[i..i + width].iter().map(Vec::as_slice).collect();
            let eccs = encode_group(rs, &group, width);
            for (message, ecc) in group.iter().zip(eccs.iter()) {
                push_codeword(&mut out, message, ecc);
            }
            i += width;
        }
    }

    while i < messages.len() {
        let mut codeword = vec![0u16; rs.block_size()];
        codeword[..msg_len].copy_from_slice(&messages[i]);
        rs.encode(&mut codeword)
            .expect("codeword has exactly block_size() symbols by construction");
        out.extend(codeword.iter().flat_map(|s| s.to_be_bytes()));
        i += 1;
    }

    out
}

fn push_codeword(out: &mut Vec<u8>, message: &[u16], ecc: &[u16]) {
    out.extend(message.iter().flat_map(|s| s.to_be_bytes()));
    out.extend(ecc.iter().flat_map(|s| s.to_be_bytes()));
}

/// Runs the NTT encode pipeline over `width` transposed blocks at
/// once, returning each block's `ecc_len` check symbols in original
/// (non-transposed) order.
fn encode_group(rs: &RSi16, messages: &[&[u16]], width: usize) -> Vec<Vec<u16>> {
    debug_assert_eq!(messages.len(), width);
    let n = rs.n;
    let ecc_len = rs.ecc_len;

    let mut lanes = vec![0u32; n * width];
    for (lane, &message) in messages.iter().enumerate() {
        for (i, &sym) in message.iter().enumerate() {
            lanes[i * width + lane] = sym as u32;
        }
    }

    rs.ntt.forward_lanes(&rs.field, &mut lanes, width);

    for (j, &m) in rs.mix.iter().enumerate() {
        for lane in 0..width {
            let idx = j * width + lane;
            lanes[idx] = rs.field.mul(lanes[idx], m);
        }
    }
    replicate(&mut lanes, ecc_len * width, n / ecc_len);

    rs.ntt.inverse_lanes(&rs.field, &mut lanes, width, ecc_len);

    (0..width)
        .map(|lane| {
            (0..ecc_len)
                .map(|j| {
                    let v = rs.field.mul(lanes[j * width + lane], rs.n_inv);
                    (v % 65536) as u16
                })
                .collect()
        })
        .collect()
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_ecc(rs: &RSi16, message: &[u16]) -> Vec<u16> {
        let mut codeword = vec![0u16; rs.block_size()];
        codeword[..message.len()].copy_from_slice(message);
        rs.encode(&mut codeword).unwrap();
        codeword[rs.message_len()..].to_vec()
    }

    #[test]
    fn lane_group_matches_scalar_for_every_width() {
        let rs = RSi16::new(64, 8, 3).unwrap();
        for &width in &[4usize, 8, 16] {
            let messages: Vec<Vec<u16>> = (0..width)
                .map(|b| {
                    (0..rs.message_len())
                        .map(|i| ((b * 991 + i * 37 + 5) % 65536) as u16)
                        .collect()
                })
                .collect();
            let refs: Vec<&[u16]> = messages.iter().map(Vec::as_slice).collect();

            let grouped = encode_group(&rs, &refs, width);
            for (b, message) in messages.iter().enumerate() {
                assert_eq!(grouped[b], scalar_ecc(&rs, message), "width={width} block={b}");
            }
        }
    }

    #[test]
    fn encode_blocks_matches_per_block_scalar_encode() {
        let rs = RSi16::new(64, 8, 3).unwrap();
        let block_count = 37; // not a multiple of 4/8/16, exercises every fallback tier
        let msg_len = rs.message_len();
        let input: Vec<u16> = (0..block_count * msg_len + 3)
            .map(|i| (i * 7 + 1) as u16)
            .collect();

        let got = encode_blocks(&rs, &input);

        let mut want = Vec::new();
        for chunk in input.chunks(msg_len) {
            let mut codeword = vec![0u16; rs.block_size()];
            codeword[..chunk.len()].copy_from_slice(chunk);
            rs.encode(&mut codeword).unwrap();
            want.extend(codeword.iter().flat_map(|s| s.to_be_bytes()));
        }

        assert_eq!(got, want);
    }

    #[test]
    fn encode_blocks_empty_input_is_empty_output() {
        let rs = RSi16::new(64, 8, 3).unwrap();
        assert!(encode_blocks(&rs, &[]).is_empty());
    }
}
