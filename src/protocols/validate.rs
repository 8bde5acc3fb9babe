//! Supersingularity check for untrusted public curves.
//!
//! A curve over GF(p) with p = 3 mod 4 is supersingular exactly when it has
//! p + 1 points. A random point whose order divides p + 1 and exceeds
//! 4 * sqrt(p) proves it, as the Hasse interval then has a single multiple
//! of that order. The check never accepts an ordinary curve.

use fp2::traits::Fp as FqTrait;
use log::{debug, trace};
use rand_core::{CryptoRng, RngCore};

use super::csidh_parameters::{NUM_PRIMES, PrimeTable};
use crate::elliptic::{curve::EdwardsCurve, point::PointY};

/// Given P = Q[lower], fill Q[i] = [(prod_{lower <= j < upper, j != i} l_j)]P
/// for every i in [lower, upper), halving the range each time.
fn cofactor_multiples<Fq: FqTrait>(
    Q: &mut [PointY<Fq>; NUM_PRIMES],
    E: &EdwardsCurve<Fq>,
    primes: &PrimeTable,
    lower: usize,
    upper: usize,
) {
    debug_assert!(lower < upper);
    if upper - lower == 1 {
        return;
    }

    let mid = lower + (upper - lower + 1) / 2;

    Q[mid] = E.ymul_many(&Q[lower], &primes.chains[lower..mid]);
    Q[lower] = E.ymul_many(&Q[lower], &primes.chains[mid..upper]);

    cofactor_multiples(Q, E, primes, lower, mid);
    cofactor_multiples(Q, E, primes, mid, upper);
}

/// Returns true when E is supersingular and false otherwise. Singular
/// constants are rejected before any point is sampled.
///
/// Points are resampled until either some [(p + 1)/l_i]P has order other
/// than 1 or l_i, which rejects E, or the orders proven so far multiply to
/// more than 4 * sqrt(p), which accepts it. Only public data and fresh
/// randomness decide the control flow.
pub fn validate<Fq: FqTrait, R: CryptoRng + RngCore>(
    E: &EdwardsCurve<Fq>,
    primes: &PrimeTable,
    rng: &mut R,
) -> bool {
    // The point counting argument below needs an elliptic curve
    if E.is_singular() == u32::MAX {
        debug!("curve rejected: singular constants");
        return false;
    }

    let mut attempts = 0usize;
    loop {
        attempts += 1;

        let mut Q = [PointY::INFINITY; NUM_PRIMES];
        let P = PointY::rand_point(rng);
        Q[0] = E.ydbl(&E.ydbl(&P));

        cofactor_multiples(&mut Q, E, primes, 0, NUM_PRIMES);

        let mut order_bits = 0u16;
        for i in (0..NUM_PRIMES).rev() {
            // Nothing is learned about l_i when [(p + 1)/l_i]P is neutral
            if Q[i].is_infinity() == u32::MAX {
                continue;
            }

            let R = E.ymul(&Q[i], &primes.chains[i]);
            if R.is_infinity() != u32::MAX {
                debug!("curve rejected: point order does not divide p + 1");
                return false;
            }

            order_bits += primes.bits[i];
            if order_bits > primes.four_sqrt_p_bits {
                debug!("curve accepted as supersingular after {attempts} point(s)");
                return true;
            }
        }

        trace!("point order too small ({order_bits} bits), resampling");
    }
}
