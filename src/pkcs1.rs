//! PKCS#1 v1.5 unpadding: the composite algorithm that demonstrates the full
//! constant-flow discipline this crate exists for.
//!
//! See `SPEC_FULL.md` §4.8 for the step-by-step design rationale. The short
//! version: any shortcut here — an early return on a bad leading byte, a
//! `break` once the `0x00` separator is found, a branch on padding validity
//! before scrubbing — becomes a timing side channel an attacker can use to
//! mount a Bleichenbacher-style padding oracle attack against the RSA key
//! that produced `input`.

use crate::buffer::mem_move_to_left;
use crate::compare::size_gt;
use crate::error::Error;
use crate::select::select;

/// Minimum PKCS#1 v1.5 EME padding length: `0x00 || 0x02`, at least 8 bytes
/// of nonzero padding, and the `0x00` separator.
const MIN_PADDED_LEN: usize = 11;

const RESULT_SUCCESS: u32 = 0;
const RESULT_OUTPUT_TOO_LARGE: u32 = 1;
const RESULT_INVALID_PADDING: u32 = 2;

/// Parses and strips PKCS#1 v1.5 encryption padding (EME-PKCS1-v1_5) from an
/// RSA-decrypted block.
///
/// `input` is the full decrypted block (`0x00 || 0x02 || PS || 0x00 || M`,
/// `PS` at least 8 nonzero bytes). On success, `output[..olen]` holds `M` and
/// `*olen` is its length. On failure, `output` is filled with
/// `min(output.len(), input.len() - 11)` zero bytes and `*olen` is set to
/// that same count — this crate pins the "unspecified" error-path `*olen`
/// value to the success-path one on purpose (see `DESIGN.md`'s Open
/// Question decisions), so the caller cannot distinguish failure from a
/// zero-length plaintext by inspecting `*olen` alone; they must check the
/// return value.
///
/// The observable control flow — instruction sequence, memory-access trace,
/// and taken branches — depends **only** on `input.len()` and
/// `output.len()`. It never depends on the contents of `input`: not the
/// plaintext, not its length, not whether the padding is valid, not where
/// the `0x00` separator falls.
///
/// # Errors
///
/// Returns [`Error::InvalidPadding`] if the padding is malformed (wrong
/// leading bytes, no separator, or fewer than 8 pad bytes) — with no
/// observable difference between those sub-reasons. Returns
/// [`Error::OutputTooLarge`] if the padding is valid but the plaintext does
/// not fit in `output`. Both must be treated as indistinguishable by the
/// caller at a security boundary.
///
/// # Panics
///
/// Panics if `input.len() < 11` (the minimum well-formed block size) — this
/// is a caller-side structural precondition, not a secret, since block
/// length derives directly from the RSA key size.
pub fn rsaes_pkcs1_v15_unpadding(
    input: &mut [u8],
    output: &mut [u8],
    olen: &mut usize,
) -> Result<(), Error> {
    let ilen = input.len();
    assert!(ilen >= MIN_PADDED_LEN);

    let output_max_len = output.len();
    let plaintext_max_size = if output_max_len > ilen - MIN_PADDED_LEN {
        ilen - MIN_PADDED_LEN
    } else {
        output_max_len
    };

    // `bad` accumulates every way the padding can be malformed. It is not a
    // 0/1 flag here: these two lines OR/XOR the raw block bytes directly in,
    // the same idiom the reference uses, so the leading-byte check is never
    // a comparison against secret block content. It must never be inspected
    // with a branch until the very end, where it is folded into the result
    // via `select` (which treats any nonzero value as "true").
    let mut bad: u8 = 0;
    bad |= input[0];
    bad |= input[1] ^ 0x02;

    // Single pass over the whole buffer: `pad_done` latches once the first
    // `0x00` separator is seen, `pad_count` counts nonzero pad bytes seen
    // before that point. Both updates run for every byte regardless of
    // where the separator actually is. `is_zero` uses the same bit-extract
    // trick as `mask::mask_of_bit` rather than a `==` comparison, since this
    // loop runs once per secret padding byte.
    let mut pad_done: u8 = 0;
    let mut pad_count: usize = 0;
    for &byte in &input[2..ilen] {
        let is_zero = 1 ^ ((byte | byte.wrapping_neg()) >> 7);
        pad_done |= is_zero;
        pad_count += (1 - pad_done) as usize;
    }

    // No separator found at all: the whole remainder was "padding".
    bad |= 1 - pad_done;
    // PS must be at least 8 bytes.
    bad |= size_gt(8, pad_count);

    // If padding is bad, behave as if the plaintext filled the whole output
    // buffer, so the size computed below never depends on padding validity.
    //
    // This subtraction is computed unconditionally even when there was no
    // separator at all (in which case `pad_count` can exceed `ilen - 3`):
    // `wrapping_sub` mirrors the reference's reliance on defined unsigned
    // wraparound for a value that `select` below will discard anyway.
    let plaintext_size_if_good = ilen.wrapping_sub(pad_count).wrapping_sub(3);
    let plaintext_size = select(bad, plaintext_max_size as u32, plaintext_size_if_good as u32)
        as usize;

    let output_too_large = size_gt(plaintext_size, plaintext_max_size);

    // Fold `bad` and `output_too_large` into a single result code with
    // nested `select`, so which error (if any) gets returned is decided by
    // arithmetic, never by a branch on either secret-derived flag:
    // invalid padding dominates output-too-large dominates success. The
    // `u32` code is only turned into this crate's `Result` type once, at the
    // very end of the function (see the final `match` below) — by then
    // every buffer read/write has already happened identically regardless
    // of this value, so that last match does not reopen the side channel
    // the rest of this function closes.
    let result_code = select(
        bad,
        RESULT_INVALID_PADDING,
        select(output_too_large, RESULT_OUTPUT_TOO_LARGE, RESULT_SUCCESS),
    );

    // Scrub the plaintext region whenever the result will not be used, with
    // a memory-access trace identical whether or not scrubbing happens: the
    // mask is either all-ones or all-zeros, and every byte in range is
    // written either way.
    let scrub_mask = crate::mask::mask_of_bit((bad | output_too_large) as u32) as u8;
    for byte in &mut input[MIN_PADDED_LEN..ilen] {
        *byte &= !scrub_mask;
    }

    // Clamp to the buffer size when it doesn't fit; copy happens at the
    // clamped size either way so the length copied never reveals whether
    // clamping occurred.
    let plaintext_size = select(
        output_too_large,
        plaintext_max_size as u32,
        plaintext_size as u32,
    ) as usize;

    // Move the plaintext so it starts exactly `plaintext_max_size` from the
    // end of `input`. Before this call its start position is secret; after
    // it, the start position is the fixed `ilen - plaintext_max_size`.
    let window = &mut input[ilen - plaintext_max_size..ilen];
    mem_move_to_left(window, plaintext_max_size, plaintext_max_size - plaintext_size);

    // The copy length depends only on `output_max_len`, never on
    // `plaintext_size` or padding validity.
    if output_max_len != 0 {
        output[..plaintext_max_size]
            .copy_from_slice(&input[ilen - plaintext_max_size..ilen]);
    }

    *olen = plaintext_size;

    // The only branch in this function conditioned on secret-derived data:
    // turning the numeric result code into this crate's `Result` type. By
    // this point every buffer read and write above has already run with a
    // trace identical across all three outcomes, so this match changes
    // nothing observable except the function's documented return value —
    // the one piece of output this function is specified to vary on
    // padding validity (see the module doc comment).
    match result_code {
        RESULT_SUCCESS => Ok(()),
        RESULT_OUTPUT_TOO_LARGE => Err(Error::OutputTooLarge),
        _ => Err(Error::InvalidPadding),
    }
}
