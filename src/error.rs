//! The error taxonomy this crate itself produces.
//!
//! The crate does not log, retry, or recover: every fallible public function
//! returns a single `Error` value and the caller decides what to do. See
//! `DESIGN.md` for why this crate carries no logging despite that being an
//! otherwise-ambient concern.

use core::fmt;

/// Errors produced by this crate's operations.
///
/// `InvalidPadding` and `OutputTooLarge` must be treated as indistinguishable
/// by callers at a security boundary (e.g. a TLS server must raise the same
/// alert for both) — see [`crate::pkcs1::rsaes_pkcs1_v15_unpadding`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A public-precondition violation: mismatched limb counts in a signed
    /// compare, or a similarly non-secret structural mismatch.
    BadInput,
    /// PKCS#1 v1.5 unpadding failed. Folds every sub-reason (leading byte
    /// wrong, block-type wrong, no separator, PS too short) into one value.
    InvalidPadding,
    /// The decrypted plaintext would not fit in the caller's output buffer.
    OutputTooLarge,
    /// A `LimbStore::grow` call could not allocate enough storage.
    Allocation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Error::BadInput => "bad input",
            Error::InvalidPadding => "invalid padding",
            Error::OutputTooLarge => "output too large",
            Error::Allocation => "allocation failure",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
