//! Exponent policies for the SIMBA scheduler.
//!
//! A policy fixes how one private exponent is packed into a byte, which of
//! the torsion points T+ and T- an exponent walks with, and whether the
//! scheduler hides spent exponents behind dummy isogenies. All of the
//! per-step decisions return `u32` masks and are computed without branching
//! on the exponent.

use fp2::traits::Fp as FqTrait;
use rand_core::{CryptoRng, RngCore};

use crate::elliptic::point::PointY;
use crate::utilities::ct::{ct_bit_mask, ct_i8_abs_sign, ct_u32_eq, ct_u32_lt};

pub trait SimbaPolicy {
    /// Name used on the command line and in logs.
    const NAME: &'static str;
    /// Whether both T+ and T- are carried through a round.
    const TWO_TORSION_POINTS: bool;
    /// Whether spent exponents are padded with dummy isogenies.
    const DUMMY_OPERATIONS: bool;

    /// Sample one packed exponent for the bound `bound`.
    fn sample_exponent<R: CryptoRng + RngCore>(rng: &mut R, bound: u8) -> u8;

    /// The signed exponent held by a packed byte.
    fn decode_exponent(byte: u8) -> i16;

    /// Whether a packed byte is a valid exponent for `bound`. Only used on
    /// untrusted input, so this may branch.
    fn is_valid_exponent(byte: u8, bound: u8) -> bool;

    /// `0xFFFFFFFF` when the walk goes in the T+ direction.
    fn direction_mask(ec: u8) -> u32;

    /// `0xFFFFFFFF` when the next isogeny for this exponent is a dummy.
    fn dummy_mask(ec: u8) -> u32;

    /// The packed exponent after one isogeny step, given the mask returned
    /// by `dummy_mask(ec)`.
    fn encode_step(ec: u8, dummy: u32) -> u8;

    fn uses_two_torsion_points() -> bool {
        Self::TWO_TORSION_POINTS
    }

    /// Move the representative matching the direction of `ec` into T[0].
    /// Calling it a second time with the same `ec` undoes the swap.
    fn sample_representative<Fq: FqTrait>(T: &mut [PointY<Fq>; 2], ec: u8) {
        let [T0, T1] = T;
        PointY::condswap(T0, T1, Self::direction_mask(ec));
    }
}

/// Uniform byte in [0, bound], by rejection on a masked random byte. Only
/// fresh randomness and the public bound take part in the comparison.
fn sample_below<R: CryptoRng + RngCore>(rng: &mut R, bound: u8) -> u8 {
    let bits = 8 - bound.leading_zeros();
    let mask = ((1u32 << bits) - 1) as u8;
    let mut buf = [0u8; 1];
    loop {
        rng.fill_bytes(&mut buf);
        let t = buf[0] & mask;
        if ct_u32_lt(bound as u32, t as u32) == 0 {
            return t;
        }
    }
}

/// Pack a signed exponent as |e| << 1 | (e >= 0).
fn pack_signed(e: i8) -> u8 {
    let (abs, sign) = ct_i8_abs_sign(e);
    (abs << 1) ^ sign
}

fn unpack_signed(byte: u8) -> i16 {
    (2 * (byte & 1) as i16 - 1) * (byte >> 1) as i16
}

/// Dummy-free walk: e_i in [-B_i, B_i] with e_i = B_i mod 2. Every step is
/// a real isogeny; once the magnitude hits zero the walk turns around and
/// goes back and forth until the B_i steps are spent.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyFree;

impl SimbaPolicy for DummyFree {
    const NAME: &'static str = "dummy-free";
    const TWO_TORSION_POINTS: bool = true;
    const DUMMY_OPERATIONS: bool = false;

    fn sample_exponent<R: CryptoRng + RngCore>(rng: &mut R, bound: u8) -> u8 {
        let r = (bound & 1) as i16;
        let t = sample_below(rng, bound) as i16;
        // [0, B] onto the integers of [-B, B] congruent to B mod 2
        let e = (((t << 1) - (bound as i16 + r)) >> 1) * 2 + r;
        pack_signed(e as i8)
    }

    fn decode_exponent(byte: u8) -> i16 {
        unpack_signed(byte)
    }

    fn is_valid_exponent(byte: u8, bound: u8) -> bool {
        let m = byte >> 1;
        m <= bound && (m & 1) == (bound & 1)
    }

    fn direction_mask(ec: u8) -> u32 {
        ct_bit_mask(ec)
    }

    fn dummy_mask(_ec: u8) -> u32 {
        0
    }

    fn encode_step(ec: u8, _dummy: u32) -> u8 {
        let m = ec >> 1;
        let s = ec & 1;
        // Flip the sign and restart at magnitude one when m = 0
        let flip = (ct_u32_eq(m as u32, 0) & 1) as u8;
        ((m.wrapping_sub(flip ^ 1) ^ flip) << 1) ^ (s ^ flip)
    }
}

/// e_i in [0, B_i] walked with T+ only, followed by B_i - e_i dummy steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct WithDummyOne;

impl SimbaPolicy for WithDummyOne {
    const NAME: &'static str = "with-dummy-one";
    const TWO_TORSION_POINTS: bool = false;
    const DUMMY_OPERATIONS: bool = true;

    fn sample_exponent<R: CryptoRng + RngCore>(rng: &mut R, bound: u8) -> u8 {
        sample_below(rng, bound)
    }

    fn decode_exponent(byte: u8) -> i16 {
        byte as i16
    }

    fn is_valid_exponent(byte: u8, bound: u8) -> bool {
        byte <= bound
    }

    fn direction_mask(_ec: u8) -> u32 {
        0
    }

    fn dummy_mask(ec: u8) -> u32 {
        ct_u32_eq(ec as u32, 0)
    }

    fn encode_step(ec: u8, dummy: u32) -> u8 {
        let bc = (dummy & 1) as u8;
        ec.wrapping_sub(bc ^ 1)
    }
}

/// e_i in [-B_i, B_i], walked with T+ or T- by sign and followed by
/// B_i - |e_i| dummy steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct WithDummyTwo;

impl SimbaPolicy for WithDummyTwo {
    const NAME: &'static str = "with-dummy-two";
    const TWO_TORSION_POINTS: bool = true;
    const DUMMY_OPERATIONS: bool = true;

    fn sample_exponent<R: CryptoRng + RngCore>(rng: &mut R, bound: u8) -> u8 {
        let t = sample_below(rng, bound << 1) as i16;
        pack_signed((t - bound as i16) as i8)
    }

    fn decode_exponent(byte: u8) -> i16 {
        unpack_signed(byte)
    }

    fn is_valid_exponent(byte: u8, bound: u8) -> bool {
        (byte >> 1) <= bound
    }

    fn direction_mask(ec: u8) -> u32 {
        ct_bit_mask(ec)
    }

    fn dummy_mask(ec: u8) -> u32 {
        ct_u32_eq((ec >> 1) as u32, 0)
    }

    fn encode_step(ec: u8, dummy: u32) -> u8 {
        let bc = (dummy & 1) as u8;
        ((ec >> 1).wrapping_sub(bc ^ 1) << 1) ^ (ec & 1)
    }
}
