//! Odd degree isogenies between Edwards curves in y-only coordinates.
//!
//! For a kernel <P> of odd prime order l with s = (l - 1)/2, the codomain
//! constants are
//!
//!   a' = a^l * (Z_1 * ... * Z_s)^8,   d' = d^l * (Y_1 * ... * Y_s)^8,
//!
//! where (Y_j : Z_j) = y([j]P), and a point is evaluated with the product
//! over the same s kernel points. See Moody and Shumow, "Analogues of
//! Velu's formulas for isogenies on alternate models of elliptic curves".

use fp2::traits::Fp as FqTrait;

use super::{curve::EdwardsCurve, point::PointY};
use crate::utilities::ct::ct_u32_eq;

/// The multiples P, [2]P, ..., [s]P of a kernel generator, plus one spare
/// slot used to recover [l]P. The capacity is fixed so that building an
/// isogeny never allocates; SIZE must be at least (l_max - 1)/2 + 1.
#[derive(Clone, Copy, Debug)]
pub struct KernelTable<Fq: FqTrait, const SIZE: usize> {
    points: [PointY<Fq>; SIZE],
}

impl<Fq: FqTrait, const SIZE: usize> KernelTable<Fq, SIZE> {
    pub fn new() -> Self {
        Self {
            points: [PointY::INFINITY; SIZE],
        }
    }

    /// The multiple [j + 1]P computed by the last call to `build()`.
    pub fn get(&self, j: usize) -> &PointY<Fq> {
        &self.points[j]
    }

    /// Fill the table with P, [2]P, ..., [s]P and return the codomain of
    /// the degree l isogeny with kernel <P>, where P on E has order l.
    ///
    /// Only the public degree l drives loop bounds. The degree 3 case,
    /// where the product has a single factor, is picked by a conditional
    /// swap rather than a branch.
    /// Cost ~ (3l + log(l) - 7)M + (l + 2log(l) + 3)S + (3l - 1)a
    pub fn build(&mut self, E: &EdwardsCurve<Fq>, P: &PointY<Fq>, l: u32) -> EdwardsCurve<Fq> {
        let s = (l >> 1) as usize;
        debug_assert!(l >= 3 && l & 1 == 1);
        debug_assert!(s < SIZE);

        let K = &mut self.points;
        K[0] = *P;
        K[1] = E.ydbl(P);

        let mut By = P.Y;
        let mut Bz = P.Z;
        for j in 2..s {
            By *= K[j - 1].Y;
            Bz *= K[j - 1].Z;
            K[j] = EdwardsCurve::yadd(&K[j - 1], P, &K[j - 2]); // [j + 1]P
        }

        // For l = 3 the product stops at P itself, this extra factor is then
        // discarded
        let mut By_full = By * K[s - 1].Y;
        let mut Bz_full = Bz * K[s - 1].Z;
        let not_three = !ct_u32_eq(l, 3);
        Fq::condswap(&mut By, &mut By_full, not_three);
        Fq::condswap(&mut Bz, &mut Bz_full, not_three);

        // Left to right exponentiation by the public l for a^l and d^l
        let d = E.d();
        let mut a_l = E.a;
        let mut d_l = d;
        let bits_l = 32 - l.leading_zeros();
        for j in (0..(bits_l - 1)).rev() {
            a_l = a_l.square();
            d_l = d_l.square();
            if (l >> j) & 1 == 1 {
                a_l *= E.a;
                d_l *= d;
            }
        }

        for _ in 0..3 {
            By = By.square();
            Bz = Bz.square();
        }

        let a_new = a_l * Bz;
        EdwardsCurve {
            a: a_new,
            ad: a_new - d_l * By,
        }
    }

    /// Return the image of Q under the isogeny of degree l whose kernel
    /// multiples are held in the table.
    /// Cost: 2(l - 1)M + 2S + (3 + l)a
    pub fn eval(&self, Q: &PointY<Fq>, l: u32) -> PointY<Fq> {
        let s = (l >> 1) as usize;
        let K = &self.points;

        let s0 = Q.Y * K[0].Z;
        let s1 = Q.Z * K[0].Y;
        // Products are formed on the isomorphic Montgomery curve
        let mut R0 = s0 + s1;
        let mut R1 = s0 - s1;

        for Kj in K.iter().take(s).skip(1) {
            let s0 = Q.Y * Kj.Z;
            let s1 = Q.Z * Kj.Y;
            R0 *= s0 + s1;
            R1 *= s0 - s1;
        }

        R0 = R0.square();
        R1 = R1.square();
        let t0 = R0 * (Q.Z + Q.Y);
        let t1 = R1 * (Q.Z - Q.Y);

        // Back to Edwards y
        PointY {
            Y: t0 - t1,
            Z: t0 + t1,
        }
    }

    /// Return [l]P, where P is the point the table was built from, using the
    /// stored multiples: [l]P = [(l + 1)/2]P + [(l - 1)/2]P with difference P.
    ///
    /// [(l + 1)/2]P is written to the spare slot s. For l = 3 the slot already
    /// holds [2]P, so the freshly computed value is kept aside by a
    /// conditional swap and the index arithmetic stays the same for every l.
    /// This clobbers the spare slot but leaves P, ..., [s]P intact.
    pub fn multiple_of_generator(&mut self, P: &PointY<Fq>, l: u32) -> PointY<Fq> {
        let si = (l >> 1) as usize;
        let is_three = ct_u32_eq(l, 3);
        let mask = (is_three & 1) as usize;
        let K = &mut self.points;

        // [si + mask + 1]P
        let mut Z = EdwardsCurve::yadd(&K[si + mask - 1], P, &K[si + mask - 2]);
        PointY::condswap(&mut Z, &mut K[si], !is_three);

        EdwardsCurve::yadd(&K[si], &K[si - 1], P)
    }
}

impl<Fq: FqTrait, const SIZE: usize> Default for KernelTable<Fq, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
