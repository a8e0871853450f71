#![deny(missing_docs)]

//! Systematic Reed-Solomon error-correcting codes.
//!
//! This crate implements classic byte-oriented Reed-Solomon codes over
//! `GF(256)` as well as a Number-Theoretic-Transform based encoder over
//! the prime field `GF(65537)` for 16-bit symbols.
//!
//! - [`Field256`] / [`Field65537`] are the finite-field building blocks.
//! - [`RS256`] is the classic byte-oriented systematic encoder/decoder.
//! - [`RSi16`] is the NTT-based systematic encoder over `GF(65537)`.
//!
//! # Example
//!
//! ```
//! use reed_solomon_ecc::RS256;
//!
//! let rs = RS256::new(Some(9), Some(5), None, 2, 0x11d).unwrap();
//! let mut codeword = [0u8; 9];
//! codeword[..5].copy_from_slice(b"Hello");
//! rs.encode(&mut codeword).unwrap();
//!
//! codeword[2] ^= 0xff; // corrupt one byte
//! assert!(rs.decode(&mut codeword));
//! assert_eq!(&codeword[..5], b"Hello");
//! ```
//!
//! ```
//! use reed_solomon_ecc::RSi16;
//!
//! let rs = RSi16::new(64, 8, 3).unwrap();
//! let mut codeword = vec![0u16; rs.block_size()];
//! for (i, slot) in codeword[..rs.message_len()].iter_mut().enumerate() {
//!     *slot = i as u16;
//! }
//! rs.encode(&mut codeword).unwrap();
//! assert!(codeword[rs.message_len()..].iter().any(|&x| x != 0));
//! ```

use std::fmt;

pub use crate::{
    field256::Field256,
    field65537::Field65537,
    rs256::RS256,
    rsi16::RSi16,
};

mod field256;
mod field65537;
mod generator;
pub mod ntt;
mod poly;
mod rs256;
mod rsi16;

// ======================================================================
// Error - PUBLIC

/// Represents all possible errors that can occur in this library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Construction parameters were inconsistent or out of range.
    ///
    /// For example `block_len`, `message_len` and `ecc_len` disagreeing
    /// with each other, or `ecc_len` being `0` or larger than the field
    /// supports.
    InvalidConfig {
        /// Human-readable description of which constraint failed.
        reason: &'static str,
    },

    /// The requested field cannot be constructed with the given parameters.
    ///
    /// This happens when `primitive` does not generate the full
    /// multiplicative group of the field, or when no root of unity of the
    /// requested order exists.
    InvalidField {
        /// Human-readable description of which constraint failed.
        reason: &'static str,
    },

    /// A buffer did not have the length required by the operation.
    DimensionMismatch {
        /// Length required by the operation.
        expected: usize,
        /// Length actually given.
        got: usize,
    },

    /// Decoding failed: the codeword could not be corrected.
    ///
    /// The codeword buffer may have been partially modified; callers
    /// needing transactional semantics must snapshot the buffer before
    /// calling [`RS256::decode`] or [`RS256::decode_erasures`].
    Uncorrectable,
}

// ======================================================================
// Error - IMPL DISPLAY

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { reason } => {
                write!(f, "invalid configuration: {}", reason)
            }

            Error::InvalidField { reason } => {
                write!(f, "invalid field: {}", reason)
            }

            Error::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "dimension mismatch: expected buffer of length {}, got {}",
                    expected, got
                )
            }

            Error::Uncorrectable => {
                write!(f, "codeword could not be corrected")
            }
        }
    }
}

// ======================================================================
// Error - IMPL ERROR

impl std::error::Error for Error {}
