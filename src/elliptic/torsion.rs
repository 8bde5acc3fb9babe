use fp2::traits::Fp as FqTrait;
use rand_core::{CryptoRng, RngCore};

use super::{curve::EdwardsCurve, point::PointY};
use crate::utilities::le_bytes::le_bytes_ct_gt;

impl<Fq: FqTrait> EdwardsCurve<Fq>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    /// Sample u uniformly from {2, ..., (p - 1)/2}.
    ///
    /// The rejection only compares fresh randomness against public bounds,
    /// so the retry loop leaks nothing about secret data.
    fn elligator_seed<R: CryptoRng + RngCore>(rng: &mut R) -> Fq {
        // (p - 1) * 2^(-1) mod p is exactly the integer (p - 1)/2
        let half_p_minus_one = (Fq::ZERO - Fq::ONE).half().encode();
        loop {
            let u = Fq::rand(rng);
            let too_large = le_bytes_ct_gt(&u.encode(), &half_p_minus_one);
            let too_small = u.is_zero() | u.equals(&Fq::ONE);
            if (too_large | too_small) == 0 {
                return u;
            }
        }
    }

    /// Elligator-style sampling of two points (T+, T-) of order dividing
    /// p + 1. Mapped to the isomorphic Montgomery curve, the affine point
    /// under T+ has y in GF(p) and the one under T- has y in GF(p^2)\GF(p).
    ///
    /// A single Legendre symbol decides which candidate is which, and the
    /// two outputs are swapped without branching. The case A' = 0 is caught
    /// with a conditional swap as well.
    /// Cost: 1 Legendre symbol + 8M + 3S + 16a
    pub fn sample_torsion_points<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> (PointY<Fq>, PointY<Fq>) {
        let u = Self::elligator_seed(rng);

        let u2 = u.square();
        let mut u2_plus_1 = u2 + Fq::ONE;
        let Cu2_minus_1 = self.ad * (u2 - Fq::ONE); // C' * (u^2 - 1)

        // Projective constants A' = 2(a + d) and C' = a - d of the
        // isomorphic Montgomery curve
        let (A, _) = self.montgomery_constants();

        let tmp_0 = A * Cu2_minus_1;
        let tmp_1 = A.square() * u2 + Cu2_minus_1.square();
        // A'C'(u^2 - 1) * ((A'u)^2 + (C'(u^2 - 1))^2)
        let mut tmp = tmp_0 * tmp_1;

        // alpha = u when A' = 0 and alpha = 0 otherwise
        let mut alpha = Fq::ZERO;
        let mut beta = u;
        Fq::condswap(&mut alpha, &mut beta, tmp.is_zero());
        u2_plus_1 *= alpha; // u^3 + u when A' = 0
        alpha *= Cu2_minus_1;

        // Candidate Montgomery X-coordinates over the common Z = C'(u^2 - 1)
        let mut X_plus = A + alpha;
        let mut X_minus = (Fq::ZERO - A) * u2 - alpha;

        tmp += u2_plus_1;
        Fq::condswap(&mut X_plus, &mut X_minus, !tmp.is_square());

        // Finally, map both points to Edwards y = (x - 1) / (x + 1)
        let T_plus = PointY {
            Y: X_plus - Cu2_minus_1,
            Z: X_plus + Cu2_minus_1,
        };
        let T_minus = PointY {
            Y: X_minus - Cu2_minus_1,
            Z: X_minus + Cu2_minus_1,
        };

        (T_plus, T_minus)
    }
}
