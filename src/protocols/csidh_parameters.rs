use super::csidh::Csidh;
use super::policy::{DummyFree, WithDummyOne, WithDummyTwo};
use crate::elliptic::y_only_arithmetic::AdditionChain;
use crate::fields::csidh::Csidh512;

/// Number of odd primes l_i with 4 * l_0 * ... * l_{N-1} = p + 1.
pub const NUM_PRIMES: usize = 74;

/// The largest l_i, which sizes the kernel tables.
pub const LARGE_PRIME: u32 = 587;

/// Room for P, ..., [(l - 1)/2]P plus one spare slot for every l_i.
pub const MAX_KERNEL_POINTS: usize = ((LARGE_PRIME >> 1) + 1) as usize;

/// The prime factorisation of (p + 1)/4 together with the data needed to
/// multiply by each factor.
#[derive(Clone, Copy, Debug)]
pub struct PrimeTable {
    pub primes: [u32; NUM_PRIMES],
    pub chains: [AdditionChain; NUM_PRIMES],
    pub bits: [u16; NUM_PRIMES],
    /// Once the proven order of a point exceeds this many bits, i.e. the
    /// order is larger than 4 * sqrt(p), the curve is supersingular.
    pub four_sqrt_p_bits: u16,
}

/// SIMBA batching for one exponent policy.
#[derive(Clone, Copy, Debug)]
pub struct SimbaParameters {
    /// Number of isogenies of degree l_i to build, B_i.
    pub bounds: [u8; NUM_PRIMES],
    /// Disjoint batches of prime indices covering 0..N.
    pub batches: &'static [&'static [u8]],
    /// Rounds per batch before every batch is merged into one.
    pub my: usize,
}

impl SimbaParameters {
    /// The fixed number of isogeny constructions in one group action.
    pub const fn total_isogenies(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < NUM_PRIMES {
            total += self.bounds[i] as usize;
            i += 1;
        }
        total
    }
}

mod csidh_512 {
    use super::{AdditionChain, NUM_PRIMES, PrimeTable, SimbaParameters};

    const fn chain(bits: u64, len: u8) -> AdditionChain {
        AdditionChain { bits, len }
    }

    #[rustfmt::skip]
    pub const PRIMES: PrimeTable = PrimeTable {
        primes: [
            349, 347, 337, 331, 317, 313, 311, 307,
            293, 283, 281, 277, 271, 269, 263, 257,
            251, 241, 239, 233, 229, 227, 223, 211,
            199, 197, 193, 191, 181, 179, 173, 167,
            163, 157, 151, 149, 139, 137, 131, 127,
            113, 109, 107, 103, 101,  97,  89,  83,
             79,  73,  71,  67,  61,  59,  53,  47,
             43,  41,  37,  31,  29,  23,  19,  17,
             13,  11,   7,   5,   3, 587, 373, 367,
            359, 353,
        ],
        // Shortest differential addition chains for each l_i
        chains: [
            chain(0x231, 11), chain(0x324, 11), chain(0x10, 10), chain(0x2D8, 11),
            chain(0x140, 10), chain(0x50, 10), chain(0x14, 10), chain(0x108, 10),
            chain(0x101, 10), chain(0x144, 10), chain(0x148, 10), chain(0x122, 10),
            chain(0x141, 10), chain(0x51, 10), chain(0x12A, 10), chain(0x109, 10),
            chain(0x118, 10), chain(0x1A2, 10), chain(0x181, 10), chain(0x0, 9),
            chain(0x134, 10), chain(0x194, 10), chain(0x185, 10), chain(0x191, 10),
            chain(0x1, 9), chain(0x198, 10), chain(0x82, 9), chain(0x88, 9),
            chain(0x81, 9), chain(0x8A, 9), chain(0xC0, 9), chain(0xA1, 9),
            chain(0xD0, 9), chain(0xC2, 9), chain(0x98, 9), chain(0xD4, 9),
            chain(0xC5, 9), chain(0x2B, 9), chain(0x40, 8), chain(0xE8, 9),
            chain(0xE1, 9), chain(0x4A, 8), chain(0x60, 8), chain(0xC, 8),
            chain(0x68, 8), chain(0x49, 8), chain(0x0, 7), chain(0x6C, 8),
            chain(0x4, 7), chain(0x14, 7), chain(0x24, 7), chain(0x9, 7),
            chain(0x2C, 7), chain(0x32, 7), chain(0x36, 7), chain(0x1, 6),
            chain(0x11, 6), chain(0x18, 6), chain(0x3, 6), chain(0x8, 5),
            chain(0xA, 5), chain(0xD, 5), chain(0x4, 4), chain(0x5, 4),
            chain(0x0, 3), chain(0x1, 3), chain(0x1, 2), chain(0x0, 1),
            chain(0x0, 0), chain(0x612, 12), chain(0x268, 11), chain(0x312, 11),
            chain(0xD1, 11), chain(0x352, 11),
        ],
        bits: [
            9, 9, 9, 9, 9, 9, 9, 9,
            9, 9, 9, 9, 9, 9, 9, 9,
            8, 8, 8, 8, 8, 8, 8, 8,
            8, 8, 8, 8, 8, 8, 8, 8,
            8, 8, 8, 8, 8, 8, 8, 7,
            7, 7, 7, 7, 7, 7, 7, 7,
            7, 7, 7, 7, 6, 6, 6, 6,
            6, 6, 6, 5, 5, 5, 5, 5,
            4, 4, 3, 3, 2, 10, 9, 9,
            9, 9,
        ],
        four_sqrt_p_bits: 258,
    };

    // SIMBA-3-8: three batches of indices i mod 3
    const BATCH_0: [u8; 25] = [
        0, 3, 6, 9, 12, 15, 18, 21, 24, 27, 30, 33, 36, 39, 42, 45, 48, 51, 54, 57, 60, 63, 66,
        69, 72,
    ];
    const BATCH_1: [u8; 25] = [
        1, 4, 7, 10, 13, 16, 19, 22, 25, 28, 31, 34, 37, 40, 43, 46, 49, 52, 55, 58, 61, 64, 67,
        70, 73,
    ];
    const BATCH_2: [u8; 24] = [
        2, 5, 8, 11, 14, 17, 20, 23, 26, 29, 32, 35, 38, 41, 44, 47, 50, 53, 56, 59, 62, 65, 68,
        71,
    ];
    const BATCHES: [&[u8]; 3] = [&BATCH_0, &BATCH_1, &BATCH_2];
    const MY: usize = 8;

    // Bounds of Onuki et al. for exponents in [-B_i, B_i]
    #[rustfmt::skip]
    const ONUKI_BOUNDS: [u8; NUM_PRIMES] = [
         2,  3,  3,  3,  3,  3,  3,  3,
         3,  3,  3,  4,  4,  4,  4,  4,
         4,  4,  4,  4,  4,  4,  4,  4,
         4,  4,  5,  5,  5,  5,  5,  5,
         5,  6,  6,  6,  6,  6,  7,  7,
         7,  7,  7,  7,  7,  7,  7,  7,
         7,  7,  8,  9,  9,  9, 10, 10,
        10, 10,  9,  8,  8,  8,  7,  7,
         7,  7,  7,  6,  5,  1,  2,  2,
         2,  2,
    ];

    // Twice the bounds above: [0, 2B_i] and the even values of [-2B_i, 2B_i]
    // both have 2B_i + 1 elements, the size of [-B_i, B_i].
    const fn doubled(bounds: [u8; NUM_PRIMES]) -> [u8; NUM_PRIMES] {
        let mut out = [0u8; NUM_PRIMES];
        let mut i = 0;
        while i < NUM_PRIMES {
            out[i] = 2 * bounds[i];
            i += 1;
        }
        out
    }

    pub const SIMBA_WITH_DUMMY_TWO: SimbaParameters = SimbaParameters {
        bounds: ONUKI_BOUNDS,
        batches: &BATCHES,
        my: MY,
    };

    pub const SIMBA_WITH_DUMMY_ONE: SimbaParameters = SimbaParameters {
        bounds: doubled(ONUKI_BOUNDS),
        batches: &BATCHES,
        my: MY,
    };

    pub const SIMBA_DUMMY_FREE: SimbaParameters = SimbaParameters {
        bounds: doubled(ONUKI_BOUNDS),
        batches: &BATCHES,
        my: MY,
    };
}

pub use csidh_512::{PRIMES as CSIDH_512_PRIMES, SIMBA_DUMMY_FREE, SIMBA_WITH_DUMMY_ONE, SIMBA_WITH_DUMMY_TWO};

/// Dummy-free CSIDH-512, exponents in [-2B_i, 2B_i] with e_i = 2B_i mod 2.
pub const CSIDH_512_DUMMY_FREE: Csidh<Csidh512, DummyFree> =
    Csidh::new(&CSIDH_512_PRIMES, &SIMBA_DUMMY_FREE);

/// CSIDH-512 with dummy isogenies and the single torsion point T+,
/// exponents in [0, 2B_i].
pub const CSIDH_512_WITH_DUMMY_ONE: Csidh<Csidh512, WithDummyOne> =
    Csidh::new(&CSIDH_512_PRIMES, &SIMBA_WITH_DUMMY_ONE);

/// CSIDH-512 with dummy isogenies and the torsion points T+ and T-,
/// exponents in [-B_i, B_i].
pub const CSIDH_512_WITH_DUMMY_TWO: Csidh<Csidh512, WithDummyTwo> =
    Csidh::new(&CSIDH_512_PRIMES, &SIMBA_WITH_DUMMY_TWO);
