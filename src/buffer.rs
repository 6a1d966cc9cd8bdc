//! Buffer primitives: constant-time memory compare, conditional copy, and
//! flow-independent left shift.

use crate::compare::{size_eq, size_gt};
use crate::hide::{hide, read_volatile_byte};
use crate::select::select;

/// Compares two equal-length byte buffers in constant time.
///
/// Returns `0` iff `a == b`; otherwise a nonzero value. The memory-access
/// trace is a strict linear sweep of both buffers. Callers must compare only
/// against `0` — never inspect the magnitude of a nonzero result, which
/// could (on a sufficiently aggressive optimizer) leak the position of the
/// first difference. Prefer [`ct_eq`] when a `bool` is all that's needed.
///
/// # Panics
///
/// Panics if `a.len() != b.len()` — an equal-length precondition is public,
/// not secret, matching the reference's equal-length contract.
#[must_use]
pub fn ct_memcmp(a: &[u8], b: &[u8]) -> u32 {
    assert_eq!(a.len(), b.len());

    let mut diff: u32 = 0;
    for i in 0..a.len() {
        let x = read_volatile_byte(&a[i]);
        let y = read_volatile_byte(&b[i]);
        diff = hide(diff | (x ^ y) as u32);
    }
    diff
}

/// Compares two byte buffers in constant time, returning a `bool`.
///
/// Unequal-length inputs are rejected immediately (that comparison is not
/// secret: lengths are non-secret inputs throughout this crate), so only the
/// equal-length case runs the constant-time sweep.
///
/// # Examples
///
/// ```
/// use ct_primitives::buffer::ct_eq;
///
/// assert!(ct_eq(b"same", b"same"));
/// assert!(!ct_eq(b"same", b"diff"));
/// assert!(!ct_eq(b"short", b"longer"));
/// ```
#[must_use]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && ct_memcmp(a, b) == 0
}

/// If `c1 == c2`, copies `src[..len]` into `dest[..len]`; otherwise leaves
/// `dest` unchanged. The load from `dest` and the store to `dest` happen
/// unconditionally in both cases, so the two outcomes are indistinguishable
/// in memory trace.
///
/// # Panics
///
/// Panics if `dest.len() < len` or `src.len() < len`.
pub fn memcpy_if_eq(dest: &mut [u8], src: &[u8], len: usize, c1: usize, c2: usize) {
    assert!(dest.len() >= len);
    assert!(src.len() >= len);

    let cond = size_eq(c1, c2);
    for i in 0..len {
        dest[i] = select(cond, src[i], dest[i]);
    }
}

/// Semantically `dest[..len].copy_from_slice(&src[offset..offset+len])`, but
/// the memory-access trace reveals only the caller-declared bound
/// `[offset_min, offset_max]`, never the actual `offset`.
///
/// Cost is `O((offset_max - offset_min) * len)`; the range is a non-secret
/// upper bound supplied by the caller.
///
/// # Panics
///
/// Panics if `offset_min > offset_max`, or if `src` is too short for any
/// candidate offset in range plus `len`.
pub fn memcpy_offset(
    dest: &mut [u8],
    src: &[u8],
    offset: usize,
    offset_min: usize,
    offset_max: usize,
    len: usize,
) {
    assert!(offset_min <= offset_max);
    for k in offset_min..=offset_max {
        assert!(src.len() >= k + len);
        memcpy_if_eq(dest, &src[k..], len, k, offset);
    }
}

/// Shifts bytes `[offset, total)` down to `[0, total - offset)` and zeros the
/// tail, with a memory-access trace depending only on `total`, never on
/// `offset`.
///
/// Equivalent to:
///
/// ```text
/// buf.copy_within(offset..total, 0);
/// buf[total - offset..total].fill(0);
/// ```
///
/// but `offset` is consumed only inside a [`select`], never as an address or
/// loop bound. Runs in `O(total^2)`.
///
/// # Panics
///
/// Panics if `buf.len() < total` or `offset > total`.
pub fn mem_move_to_left(buf: &mut [u8], total: usize, offset: usize) {
    assert!(buf.len() >= total);
    assert!(offset <= total);

    if total == 0 {
        return;
    }

    for i in 0..total {
        let no_op = size_gt(total - offset, i);
        for n in 0..total - 1 {
            let current = read_volatile_byte(&buf[n]);
            let next = read_volatile_byte(&buf[n + 1]);
            buf[n] = select(no_op, current, next);
        }
        let last = read_volatile_byte(&buf[total - 1]);
        buf[total - 1] = select(no_op, last, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ct_memcmp_zero_iff_equal() {
        assert_eq!(ct_memcmp(b"hello", b"hello"), 0);
        assert_ne!(ct_memcmp(b"hello", b"hellp"), 0);
        assert_ne!(ct_memcmp(b"hello", b"world"), 0);
        assert_eq!(ct_memcmp(b"", b""), 0);
    }

    #[test]
    fn ct_eq_rejects_length_mismatch() {
        assert!(!ct_eq(b"foo", b""));
        assert!(!ct_eq(b"foo", b"quux"));
    }

    #[test]
    fn memcpy_if_eq_copies_only_when_tags_match() {
        let mut dest = [0u8; 4];
        let src = [1, 2, 3, 4];

        memcpy_if_eq(&mut dest, &src, 4, 5, 5);
        assert_eq!(dest, [1, 2, 3, 4]);

        memcpy_if_eq(&mut dest, &[9, 9, 9, 9], 4, 5, 6);
        assert_eq!(dest, [1, 2, 3, 4]);
    }

    #[test]
    fn memcpy_offset_reads_at_secret_offset() {
        let src = [0xAA, 1, 2, 3, 4, 5, 0xBB];
        let mut dest = [0u8; 3];
        memcpy_offset(&mut dest, &src, 2, 0, 4, 3);
        assert_eq!(dest, [2, 3, 4]);
    }

    #[test]
    fn mem_move_to_left_shifts_and_zeros_tail() {
        let mut buf = *b"abcdef";
        mem_move_to_left(&mut buf, 6, 2);
        assert_eq!(&buf, b"cdef\0\0");
    }

    #[test]
    fn mem_move_to_left_offset_zero_is_identity() {
        let mut buf = *b"abcdef";
        mem_move_to_left(&mut buf, 6, 0);
        assert_eq!(&buf, b"abcdef");
    }

    #[test]
    fn mem_move_to_left_offset_equals_total_zeros_everything() {
        let mut buf = *b"abcdef";
        mem_move_to_left(&mut buf, 6, 6);
        assert_eq!(&buf, &[0u8; 6]);
    }

    #[test]
    fn mem_move_to_left_trace_independent_of_offset() {
        // Not a timing harness, but confirms the *output* for every offset
        // at a fixed total matches the documented memmove+memset semantics,
        // which is what the trace-independent implementation must still
        // compute correctly.
        let original = *b"0123456789";
        for offset in 0..=original.len() {
            let mut buf = original;
            mem_move_to_left(&mut buf, original.len(), offset);
            let mut expected = [0u8; 10];
            expected[..original.len() - offset].copy_from_slice(&original[offset..]);
            assert_eq!(buf, expected, "offset={offset}");
        }
    }
}
