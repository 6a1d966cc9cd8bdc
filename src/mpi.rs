//! Big-integer conditional operations.
//!
//! The big-integer representation itself — arithmetic, allocation, growth —
//! is an external collaborator this crate does not implement (see
//! `SPEC_FULL.md` §6). [`LimbStore`] is the minimal trait boundary the core
//! consumes from that collaborator: enough to grow a limb vector, read/write
//! its sign, and access its limbs, nothing about how those limbs are
//! produced or stored beyond that.

use crate::compare::uint_lt;
use crate::error::Error;
use crate::mask::mask_of_bit;
use crate::select::select;
use crate::word::Word;

/// The minimal interface this crate needs from a big-integer collaborator.
///
/// A real bignum crate implements this over its own representation; the
/// functions in this module are generic over any implementor and never
/// assume anything about how limbs are allocated beyond `grow`'s contract.
pub trait LimbStore {
    /// The limb width used by this representation.
    type Limb: Word;

    /// Number of limbs currently populated.
    fn len(&self) -> usize;

    /// `true` iff [`LimbStore::len`] is `0`.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sign, `-1` or `+1`.
    fn sign(&self) -> i8;

    /// Sets the sign, `-1` or `+1`.
    fn set_sign(&mut self, sign: i8);

    /// Limbs, least-significant first.
    fn limbs(&self) -> &[Self::Limb];

    /// Limbs, least-significant first, mutably.
    fn limbs_mut(&mut self) -> &mut [Self::Limb];

    /// Ensures at least `n` limb slots are available, zero-extending.
    ///
    /// `n` is always a non-secret size (sizes are allowed to leak per
    /// `SPEC_FULL.md`'s data-model invariants). May fail with
    /// [`Error::Allocation`].
    fn grow(&mut self, n: usize) -> Result<(), Error>;
}

/// Widens a `-1`/`+1` sign to the `u32` representation [`select`] operates
/// on.
#[must_use]
#[inline(always)]
fn sign_to_u32(sign: i8) -> u32 {
    (sign as i32) as u32
}

/// Narrows a `select`-produced `u32` back to a `-1`/`+1` sign.
#[must_use]
#[inline(always)]
fn sign_from_u32(value: u32) -> i8 {
    (value as i32) as i8
}

/// Per-limb constant-time conditional assign: `dst[i] = cond ? src[i] : dst[i]`.
///
/// Used by [`mpi_safe_cond_assign`] after the destination has already been
/// grown; exposed separately because it matches the reference's
/// `core_cond_assign` split (§6).
///
/// # Panics
///
/// Panics if `dst.len() != src.len()`.
pub fn limb_cond_assign<T: Word>(dst: &mut [T], src: &[T], cond: u8) {
    assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = select(cond, *s, *d);
    }
}

/// Per-limb constant-time conditional swap.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
pub fn limb_cond_swap<T: Word>(a: &mut [T], b: &mut [T], cond: u8) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        let new_x = select(cond, *y, *x);
        let new_y = select(cond, *x, *y);
        *x = new_x;
        *y = new_y;
    }
}

/// Conditionally assigns `x <- y`, without leaking whether the assignment
/// was made.
///
/// If `assign == 1`, `x` becomes numerically equal to `y`. If `assign == 0`,
/// `x` is left bit-identical to its prior value in every populated limb.
/// Either way, `x` is grown to hold `y.len()` limbs first — that growth, and
/// therefore the access pattern it implies, depends only on the sizes
/// involved, which are public.
pub fn mpi_safe_cond_assign<X, Y>(x: &mut X, y: &Y, assign: u8) -> Result<(), Error>
where
    X: LimbStore,
    Y: LimbStore<Limb = X::Limb>,
{
    let limb_mask = mask_of_bit(X::Limb::from_cond(assign));

    x.grow(y.len())?;

    // Signs are `-1`/`+1`; round-trip through `u32` so `select` (which is
    // only implemented for unsigned `Word` types) can pick between them.
    let new_sign = select(assign, sign_to_u32(y.sign()), sign_to_u32(x.sign()));
    x.set_sign(sign_from_u32(new_sign));

    let y_len = y.len();
    limb_cond_assign(&mut x.limbs_mut()[..y_len], &y.limbs()[..y_len], assign);

    let x_len = x.len();
    for limb in &mut x.limbs_mut()[y_len..x_len] {
        *limb = *limb & !limb_mask;
    }

    Ok(())
}

/// Conditionally swaps the contents of `x` and `y`, without leaking whether
/// the swap was made.
///
/// A reference/pointer swap is deliberately not an option here: the two
/// arguments are disjoint `&mut` borrows, so the borrow checker itself rules
/// out the aliasing trick the reference warns against — swapping references
/// would change the *identity* `x`/`y` refer to on subsequent calls, which is
/// exactly the "memory access pattern changes after the fact" leak the
/// reference's docstring warns about.
pub fn mpi_safe_cond_swap<X>(x: &mut X, y: &mut X, swap: u8) -> Result<(), Error>
where
    X: LimbStore,
{
    x.grow(y.len())?;
    y.grow(x.len())?;

    let x_sign = sign_to_u32(x.sign());
    let y_sign = sign_to_u32(y.sign());
    x.set_sign(sign_from_u32(select(swap, y_sign, x_sign)));
    y.set_sign(sign_from_u32(select(swap, x_sign, y_sign)));

    let n = x.len();
    limb_cond_swap(&mut x.limbs_mut()[..n], &mut y.limbs_mut()[..n], swap);

    Ok(())
}

/// Unsigned less-than over two equal-length limb slices, most-significant
/// limb first.
///
/// The loop always runs to completion regardless of where the deciding limb
/// is found.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[must_use]
pub fn mpi_core_lt_ct<T: Word>(a: &[T], b: &[T]) -> u8 {
    assert_eq!(a.len(), b.len());

    let mut result: u8 = 0;
    let mut done: u8 = 0;

    for i in (0..a.len()).rev() {
        let b_lt_a = uint_lt(b[i], a[i]);
        done |= b_lt_a;

        let a_lt_b = uint_lt(a[i], b[i]);
        result |= a_lt_b & (1 - done);
        done |= a_lt_b;
    }

    result
}

/// Signed less-than over two big integers represented as `(sign, limbs)`.
///
/// Requires `x.len() == y.len()` — a public, non-secret precondition, so
/// failing it eagerly with [`Error::BadInput`] does not leak anything the
/// reference's own `MBEDTLS_ERR_MPI_BAD_INPUT_DATA` return didn't already.
pub fn mpi_lt_mpi_ct<X: LimbStore>(x: &X, y: &X) -> Result<u8, Error> {
    if x.len() != y.len() {
        return Err(Error::BadInput);
    }

    // Sign is `-1` or `+1`; as a `u8` bit pattern that's `0xFF` or `0x01`,
    // so the top bit alone tells negative from positive. A mask extraction,
    // not a `<` comparison, on a value this module treats as secret.
    let x_negative = (x.sign() as u8) >> 7;
    let y_negative = (y.sign() as u8) >> 7;

    let mut cond = x_negative ^ y_negative;
    let mut result = cond & x_negative;
    let mut done = cond;

    let xs = x.limbs();
    let ys = y.limbs();
    for i in (0..xs.len()).rev() {
        cond = uint_lt(ys[i], xs[i]);
        result |= cond & (1 - done) & x_negative;
        done |= cond;

        cond = uint_lt(xs[i], ys[i]);
        result |= cond & (1 - done) & (1 - x_negative);
        done |= cond;
    }

    Ok(result)
}

/// A minimal, heap-backed [`LimbStore`] implementor.
///
/// This is **not** a production big-integer type: it has no arithmetic, no
/// parsing, and grows by simple truncation/zero-extension. It exists solely
/// so this crate's own tests and doctests can exercise the conditional
/// operations above against a concrete type, without depending on a full
/// bignum crate for that one purpose. Real callers (an RSA or TLS stack)
/// bring their own `LimbStore` implementation over their own representation.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpi<T: Word> {
    sign: i8,
    limbs: alloc::vec::Vec<T>,
}

#[cfg(feature = "alloc")]
impl<T: Word> Mpi<T> {
    /// Builds an `Mpi` from its limbs (least-significant first) and sign.
    pub fn from_limbs(limbs: alloc::vec::Vec<T>, sign: i8) -> Self {
        debug_assert!(sign == 1 || sign == -1);
        Self { sign, limbs }
    }
}

#[cfg(feature = "alloc")]
impl<T: Word> LimbStore for Mpi<T> {
    type Limb = T;

    fn len(&self) -> usize {
        self.limbs.len()
    }

    fn sign(&self) -> i8 {
        self.sign
    }

    fn set_sign(&mut self, sign: i8) {
        self.sign = sign;
    }

    fn limbs(&self) -> &[T] {
        &self.limbs
    }

    fn limbs_mut(&mut self) -> &mut [T] {
        &mut self.limbs
    }

    fn grow(&mut self, n: usize) -> Result<(), Error> {
        if self.limbs.len() < n {
            self.limbs.resize(n, T::ZERO);
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn cond_assign_one_copies_value() {
        let mut x = Mpi::from_limbs(vec![1u32, 2, 3], 1);
        let y = Mpi::from_limbs(vec![9u32, 8, 7], -1);
        mpi_safe_cond_assign(&mut x, &y, 1).unwrap();
        assert_eq!(x.limbs(), &[9, 8, 7]);
        assert_eq!(x.sign(), -1);
    }

    #[test]
    fn cond_assign_zero_leaves_value_unchanged() {
        let mut x = Mpi::from_limbs(vec![1u32, 2, 3], 1);
        let before = x.clone();
        let y = Mpi::from_limbs(vec![9u32, 8, 7], -1);
        mpi_safe_cond_assign(&mut x, &y, 0).unwrap();
        assert_eq!(x, before);
    }

    #[test]
    fn cond_assign_zero_extends_when_y_is_shorter() {
        let mut x = Mpi::from_limbs(vec![1u32, 2, 3], 1);
        let y = Mpi::from_limbs(vec![9u32], 1);
        mpi_safe_cond_assign(&mut x, &y, 1).unwrap();
        assert_eq!(x.limbs(), &[9, 0, 0]);
    }

    #[test]
    fn cond_swap_one_exchanges_values() {
        let mut x = Mpi::from_limbs(vec![0x1111u32; 8], 1);
        let mut y = Mpi::from_limbs(vec![0xFFFFu32; 8], -1);
        let x_before = x.clone();
        let y_before = y.clone();

        mpi_safe_cond_swap(&mut x, &mut y, 0).unwrap();
        assert_eq!(x, x_before);
        assert_eq!(y, y_before);

        mpi_safe_cond_swap(&mut x, &mut y, 1).unwrap();
        assert_eq!(x, y_before);
        assert_eq!(y, x_before);
    }

    #[test]
    fn core_lt_ct_matches_big_endian_unsigned_comparison() {
        assert_eq!(mpi_core_lt_ct::<u32>(&[0, 1], &[0, 2]), 1);
        assert_eq!(mpi_core_lt_ct::<u32>(&[0, 2], &[0, 1]), 0);
        assert_eq!(mpi_core_lt_ct::<u32>(&[5, 5], &[5, 5]), 0);
        assert_eq!(mpi_core_lt_ct::<u32>(&[u32::MAX, 0], &[0, 1]), 0);
    }

    #[test]
    fn lt_mpi_ct_rejects_length_mismatch() {
        let x = Mpi::from_limbs(vec![1u32, 2], 1);
        let y = Mpi::from_limbs(vec![1u32], 1);
        assert_eq!(mpi_lt_mpi_ct(&x, &y), Err(Error::BadInput));
    }

    #[test]
    fn lt_mpi_ct_differing_signs() {
        let pos = Mpi::from_limbs(vec![1u32, 0], 1);
        let neg = Mpi::from_limbs(vec![1u32, 0], -1);
        assert_eq!(mpi_lt_mpi_ct(&neg, &pos), Ok(1));
        assert_eq!(mpi_lt_mpi_ct(&pos, &neg), Ok(0));
    }

    #[test]
    fn lt_mpi_ct_same_sign_magnitude_decides() {
        let small = Mpi::from_limbs(vec![0u32, 1], 1);
        let big = Mpi::from_limbs(vec![0u32, 2], 1);
        assert_eq!(mpi_lt_mpi_ct(&small, &big), Ok(1));
        assert_eq!(mpi_lt_mpi_ct(&big, &small), Ok(0));

        let small_neg = Mpi::from_limbs(vec![0u32, 1], -1);
        let big_neg = Mpi::from_limbs(vec![0u32, 2], -1);
        // Larger magnitude negative number is the smaller value.
        assert_eq!(mpi_lt_mpi_ct(&big_neg, &small_neg), Ok(1));
        assert_eq!(mpi_lt_mpi_ct(&small_neg, &big_neg), Ok(0));
    }
}
