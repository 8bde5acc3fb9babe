//! Constant-time helpers on small integers.
//!
//! All masks follow the field backend convention: `0xFF..FF` for true and
//! `0x00..00` for false. None of these functions branch on or index memory
//! by their inputs.

/// Returns `0x00..00` when `x = 0` and `0xFF..FF` otherwise in constant time.
pub fn ct_u32_neq_zero(x: u32) -> u32 {
    // (x | -x) will be zero only when y is zero.
    let q = x | x.wrapping_neg();

    // Similarly, r = (q | - q) >> 31 will be 0 only if x is zero, otherwise it will be 1
    // So then -r is  0xFF..FF when x != 0 and 0x00..00 otherwise.
    ((q | q.wrapping_neg()) >> 31).wrapping_neg()
}

/// Returns `0xFF..FF` when `x = 0` and `0x00..00` otherwise in constant time.
pub fn ct_u32_eq_zero(x: u32) -> u32 {
    !ct_u32_neq_zero(x)
}

/// Returns `0xFF..FF` when two values are equal and zero otherwise
pub fn ct_u32_eq(x: u32, y: u32) -> u32 {
    ct_u32_eq_zero(x ^ y)
}

/// Returns `0xFF..FF` when `x < y` and zero otherwise. Both inputs must be
/// below `2^31`.
pub fn ct_u32_lt(x: u32, y: u32) -> u32 {
    // x - y borrows into the top bit exactly when x < y
    ((x.wrapping_sub(y)) >> 31).wrapping_neg()
}

/// Turn the low bit of `b` into a mask.
#[inline(always)]
pub fn ct_bit_mask(b: u8) -> u32 {
    ((b & 1) as u32).wrapping_neg()
}

/// Return `a` if `ctl = 0x00..00` and `b` if `ctl = 0xFF..FF`.
#[inline(always)]
pub fn ct_u8_select(a: u8, b: u8, ctl: u32) -> u8 {
    a ^ ((a ^ b) & (ctl as u8))
}

/// Read `table[pos]` touching every entry, so the memory access pattern does
/// not depend on `pos`.
pub fn ct_u8_lookup(table: &[u8], pos: usize) -> u8 {
    let mut r = table[0];
    for (i, v) in table.iter().enumerate().skip(1) {
        let ctl = ct_u32_eq(i as u32, pos as u32);
        r = ct_u8_select(r, *v, ctl);
    }
    r
}

/// Absolute value and sign of a small signed integer, without branching.
/// The returned sign bit is 1 for `x >= 0` and 0 for `x < 0`.
pub fn ct_i8_abs_sign(x: i8) -> (u8, u8) {
    let sgn = x >> 7;
    let abs = ((x ^ sgn).wrapping_sub(sgn)) as u8;
    (abs, (1 + sgn) as u8 & 1)
}
