use fp2::traits::Fp as FqTrait;

use super::{curve::EdwardsCurve, point::PointY};

/// A differential addition chain computing [l]P from the triple
/// (P, [2]P, [3]P). Bit j of `bits` (read from the least significant end)
/// picks which register is added to the running point at step j. Chains are
/// public, so branching on them is fine.
#[derive(Clone, Copy, Debug)]
pub struct AdditionChain {
    pub bits: u64,
    pub len: u8,
}

impl<Fq: FqTrait> EdwardsCurve<Fq> {
    /// y-only doubling, done as an x-only doubling on the isomorphic
    /// Montgomery curve with the result mapped back to Edwards y.
    /// This uses the constant (a - d) rather than d.
    /// Cost: 4M + 2S + 4a
    #[inline(always)]
    pub fn ydbl_coords(&self, Y: &Fq, Z: &Fq) -> (Fq, Fq) {
        let mut t0 = Y.square();
        let mut t1 = Z.square();

        let mut Z_new = self.ad * t0;
        let Y_new = Z_new * t1;
        t1 -= t0;
        t0 = self.a * t1;
        Z_new += t0;
        t0 = Z_new * t1;

        (Y_new - t0, Y_new + t0)
    }

    /// Return [2]P
    #[inline(always)]
    pub fn ydbl(&self, P: &PointY<Fq>) -> PointY<Fq> {
        let (Y, Z) = self.ydbl_coords(&P.Y, &P.Z);
        PointY { Y, Z }
    }

    /// y-only differential addition: return P + Q given P - Q.
    /// The formula does not depend on the curve constants.
    /// Cost: 4M + 2S + 6a
    #[inline(always)]
    pub fn yadd(P: &PointY<Fq>, Q: &PointY<Fq>, PQ: &PointY<Fq>) -> PointY<Fq> {
        // Map the difference to the isomorphic Montgomery curve
        let XD = PQ.Z + PQ.Y;
        let ZD = PQ.Z - PQ.Y;

        let mut t0 = P.Z * Q.Y;
        let mut t1 = P.Y * Q.Z;
        let V0 = (t0 + t1).square();
        let V1 = (t0 - t1).square();
        t0 = V0 * ZD;
        t1 = V1 * XD;

        // And back to Edwards y
        PointY {
            Y: t0 - t1,
            Z: t0 + t1,
        }
    }

    /// Return [l]P where `chain` is the addition chain of l.
    ///
    /// The three registers hold consecutive chain values and are seeded with
    /// P, [2]P and [3]P. When the difference register is the neutral point
    /// the addition degenerates into a doubling, which is handled explicitly.
    /// Cost ~ 1.5*log2(l)*(4M + 2S)
    pub fn ymul(&self, P: &PointY<Fq>, chain: &AdditionChain) -> PointY<Fq> {
        let P2 = self.ydbl(P);
        let P3 = Self::yadd(&P2, P, P);
        let mut R = [*P, P2, P3];

        let mut bits = chain.bits;
        for _ in 0..chain.len {
            let b = (bits & 1) as usize;
            let T = if R[b].is_infinity() == u32::MAX {
                self.ydbl(&R[2])
            } else {
                Self::yadd(&R[2], &R[b ^ 1], &R[b])
            };
            R = [R[b ^ 1], R[2], T];
            bits >>= 1;
        }

        R[2]
    }

    /// Return [l_1 * l_2 * ... * l_k]P for the given chains.
    pub fn ymul_many<'a, I>(&self, P: &PointY<Fq>, chains: I) -> PointY<Fq>
    where
        I: IntoIterator<Item = &'a AdditionChain>,
    {
        chains
            .into_iter()
            .fold(*P, |Q, chain| self.ymul(&Q, chain))
    }
}
