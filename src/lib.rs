//! Constant-time primitives for side-channel-resistant cryptographic code.
//!
//! This crate gives higher-level cryptographic code (RSA PKCS#1 v1.5
//! decryption, TLS CBC MAC verification, base64 decoding, big-integer
//! conditional operations) a set of building blocks whose execution time,
//! memory-access trace, and branch-trace are independent of secret inputs.
//! It is the defense against timing, cache, and branch-predictor side
//! channels such as Lucky-13 and Bleichenbacher.
//!
//! The layers, leaves first:
//!
//! - [`mask`] — turn a 0/1 condition into an all-ones/all-zeros mask.
//! - [`select`] — pick between two values without branching.
//! - [`compare`] — equality, less-than, greater-than, range membership.
//! - [`buffer`] — constant-time memory compare, conditional copy, shift.
//! - [`mpi`] — big-integer conditional assign/swap/compare over a minimal
//!   `LimbStore` trait boundary.
//! - [`pkcs1`] — PKCS#1 v1.5 unpadding, the composite showpiece.
//!
//! # Non-goals
//!
//! This crate does not defend against physical side channels (power, EM,
//! fault injection) or adversaries who can single-step execution, and it
//! deliberately trades throughput for flow-independence — do not expect
//! these primitives to be as fast as a branching equivalent.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod buffer;
pub mod compare;
pub mod error;
mod hide;
pub mod mask;
pub mod mpi;
pub mod pkcs1;
pub mod select;
pub mod word;

pub use buffer::{ct_eq, ct_memcmp, mem_move_to_left, memcpy_if_eq, memcpy_offset};
pub use compare::{size_eq, size_ge, size_gt, size_lt, uchar_in_range, uint_lt};
pub use error::Error;
pub use mask::mask_of_bit;
pub use mpi::{mpi_core_lt_ct, mpi_lt_mpi_ct, mpi_safe_cond_assign, mpi_safe_cond_swap, LimbStore};
pub use pkcs1::rsaes_pkcs1_v15_unpadding;
pub use select::select;
pub use word::Word;
