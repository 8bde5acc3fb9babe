//! The SIMBA scheduler evaluating the class group action.
//!
//! Prime indices are split into batches which are served round robin. Each
//! round samples fresh torsion points, kills the order of everything outside
//! the current batch, then walks one isogeny of every unfinished degree in
//! the batch. After `my` rounds per batch the batches are merged. The loop
//! runs until the fixed total of isogeny constructions for the policy is
//! reached, whatever the private exponents are.

use std::marker::PhantomData;

use fp2::traits::Fp as FqTrait;
use log::{debug, trace};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::csidh_parameters::{MAX_KERNEL_POINTS, NUM_PRIMES, PrimeTable, SimbaParameters};
use super::policy::SimbaPolicy;
use crate::elliptic::{curve::EdwardsCurve, isogeny::KernelTable, point::PointY};
use crate::utilities::ct::ct_u8_lookup;

/// Operation counts of a single group action evaluation.
///
/// Counts are taken at the level of curve operations. Field multiplications
/// and squarings are not tracked, as the field backend keeps no counters;
/// the cost comments on each curve routine give their field cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionMetrics {
    pub rounds: usize,
    pub torsion_samples: usize,
    pub isogeny_constructions: usize,
    pub isogeny_evaluations: usize,
    pub scalar_multiplications: usize,
    /// Steps where the kernel point came out neutral and nothing was built.
    pub skipped_steps: usize,
    pub merged: bool,
}

impl ::std::fmt::Display for ActionMetrics {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(
            f,
            "rounds: {}, torsion samples: {}, isogenies: {}, evaluations: {}, \
             scalar multiplications: {}, skipped steps: {}, merged: {}",
            self.rounds,
            self.torsion_samples,
            self.isogeny_constructions,
            self.isogeny_evaluations,
            self.scalar_multiplications,
            self.skipped_steps,
            self.merged
        )
    }
}

/// Fixed capacity list of prime indices.
#[derive(Clone, Copy, Debug)]
struct IndexList {
    items: [u8; NUM_PRIMES],
    len: usize,
}

impl IndexList {
    const fn new() -> Self {
        Self {
            items: [0; NUM_PRIMES],
            len: 0,
        }
    }

    fn push(&mut self, i: u8) {
        self.items[self.len] = i;
        self.len += 1;
    }

    fn as_slice(&self) -> &[u8] {
        &self.items[..self.len]
    }
}

/// Working state of one evaluation. Nothing here outlives the call.
pub(crate) struct Simba<'a, Fq: FqTrait, P: SimbaPolicy> {
    primes: &'a PrimeTable,
    params: &'a SimbaParameters,
    curve: EdwardsCurve<Fq>,
    exponents: [u8; NUM_PRIMES],
    remaining: [u8; NUM_PRIMES],
    finished: [bool; NUM_PRIMES],
    batches: Vec<IndexList>,
    complements: Vec<IndexList>,
    last: Vec<u8>,
    kernel: KernelTable<Fq, MAX_KERNEL_POINTS>,
    metrics: ActionMetrics,
    _policy: PhantomData<P>,
}

impl<'a, Fq: FqTrait, P: SimbaPolicy> Simba<'a, Fq, P>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    pub(crate) fn new(
        primes: &'a PrimeTable,
        params: &'a SimbaParameters,
        curve: &EdwardsCurve<Fq>,
        exponents: &[u8; NUM_PRIMES],
    ) -> Self {
        let remaining = params.bounds;
        let finished = remaining.map(|b| b == 0);

        let mut batches = Vec::with_capacity(params.batches.len());
        let mut complements = Vec::with_capacity(params.batches.len());
        let mut last = Vec::with_capacity(params.batches.len());
        for batch in params.batches {
            let mut members = [false; NUM_PRIMES];
            let mut list = IndexList::new();
            for i in batch.iter() {
                members[*i as usize] = true;
                list.push(*i);
            }

            // Degrees with nothing to do are cleared from the start
            let mut complement = IndexList::new();
            for (i, m) in members.iter().enumerate() {
                if !m || finished[i] {
                    complement.push(i as u8);
                }
            }

            last.push(batch.last().copied().unwrap_or_default());
            batches.push(list);
            complements.push(complement);
        }

        Self {
            primes,
            params,
            curve: *curve,
            exponents: *exponents,
            remaining,
            finished,
            batches,
            complements,
            last,
            kernel: KernelTable::new(),
            metrics: ActionMetrics::default(),
            _policy: PhantomData,
        }
    }

    /// Replace all batches by a single one holding the unfinished indices.
    fn merge_batches(&mut self) {
        let mut batch = IndexList::new();
        let mut complement = IndexList::new();
        let mut last = 0;
        for i in 0..NUM_PRIMES {
            if self.finished[i] {
                complement.push(i as u8);
            } else {
                batch.push(i as u8);
                last = i as u8;
            }
        }

        debug!(
            "merging batches after {} rounds, {} degree(s) left",
            self.metrics.rounds, batch.len
        );

        self.batches = vec![batch];
        self.complements = vec![complement];
        self.last = vec![last];
        self.metrics.merged = true;
    }

    /// Return [c]T where c is the product of the l_j over the indices of `list`.
    fn clear_indices(&mut self, T: &PointY<Fq>, list: &[u8]) -> PointY<Fq> {
        self.metrics.scalar_multiplications += list.len();
        self.curve.ymul_many(
            T,
            list.iter().map(|j| &self.primes.chains[*j as usize]),
        )
    }

    /// One step of degree l_idx. Returns true when an isogeny was built,
    /// real or dummy.
    fn step(&mut self, T: &mut [PointY<Fq>; 2], batch: &IndexList, pos: usize, last: u8) -> bool {
        let idx = batch.items[pos];
        let i = idx as usize;
        let primes = self.primes;
        let l = primes.primes[i];
        let chain = &primes.chains[i];
        let two_points = P::uses_two_torsion_points();

        let ec = ct_u8_lookup(&self.exponents, i);
        P::sample_representative(T, ec);

        // Keep only the l-part of T[0]
        let mut later = IndexList::new();
        for j in batch.as_slice()[pos + 1..].iter() {
            if !self.finished[*j as usize] {
                later.push(*j);
            }
        }
        let mut G = self.clear_indices(&T[0], later.as_slice());

        // Only the kernel point decides whether the step happens, for every
        // policy. A neutral T[1] in the dummy-free walk stalls the steps in
        // its direction until the next round resamples it.
        let built = G.is_infinity() != u32::MAX;
        if built {
            let dummy = P::dummy_mask(ec);
            // A dummy step builds from T[0] itself, whose image is discarded
            G.set_cond(&T[0], dummy);
            let codomain = self.kernel.build(&self.curve, &G, l);
            self.metrics.isogeny_constructions += 1;

            // The points are thrown away after the last degree of the batch
            if idx != last {
                if P::DUMMY_OPERATIONS {
                    if two_points {
                        T[1] = self.curve.ymul(&T[1], chain);
                        self.metrics.scalar_multiplications += 1;
                    }
                    let image_0 = self.kernel.eval(&T[0], l);
                    self.metrics.isogeny_evaluations += 1;
                    if two_points {
                        let image_1 = self.kernel.eval(&T[1], l);
                        self.metrics.isogeny_evaluations += 1;
                        T[1].set_cond(&image_1, !dummy);
                    }

                    T[0] = self.kernel.multiple_of_generator(&G, l);
                    T[0].set_cond(&image_0, !dummy);
                } else {
                    T[0] = self.kernel.eval(&T[0], l);
                    T[1] = self.kernel.eval(&T[1], l);
                    T[1] = codomain.ymul(&T[1], chain);
                    self.metrics.isogeny_evaluations += 2;
                    self.metrics.scalar_multiplications += 1;
                }
            }

            self.curve.set_cond(&codomain, !dummy);
            self.exponents[i] = P::encode_step(ec, dummy);
            self.remaining[i] -= 1;
        } else {
            if two_points {
                T[1] = self.curve.ymul(&T[1], chain);
                self.metrics.scalar_multiplications += 1;
            }
            self.metrics.skipped_steps += 1;
        }

        P::sample_representative(T, ec);
        built
    }

    /// Serve batch m once.
    fn round<R: CryptoRng + RngCore>(&mut self, m: usize, rng: &mut R) -> usize {
        let two_points = P::uses_two_torsion_points();

        let (T_plus, T_minus) = self.curve.sample_torsion_points(rng);
        self.metrics.torsion_samples += 1;
        let mut T = if two_points {
            [T_minus, T_plus]
        } else {
            [T_plus, T_minus]
        };

        // Clear the 2-part of p + 1 and every degree outside the batch
        let complement = self.complements[m];
        T[0] = self.curve.ydbl(&self.curve.ydbl(&T[0]));
        T[0] = self.clear_indices(&T[0], complement.as_slice());
        if two_points {
            T[1] = self.curve.ydbl(&self.curve.ydbl(&T[1]));
            T[1] = self.clear_indices(&T[1], complement.as_slice());
        }

        let batch = self.batches[m];
        let last = self.last[m];
        let mut built = 0;
        for pos in 0..batch.len {
            let i = batch.items[pos] as usize;
            if self.finished[i] {
                continue;
            }

            if self.step(&mut T, &batch, pos, last) {
                built += 1;
            }

            if self.remaining[i] == 0 {
                self.finished[i] = true;
                self.complements[m].push(i as u8);
            }
        }

        built
    }

    /// Run rounds until every B_i isogenies of degree l_i have been built.
    pub(crate) fn run<R: CryptoRng + RngCore>(
        mut self,
        rng: &mut R,
    ) -> (EdwardsCurve<Fq>, ActionMetrics) {
        let target = self.params.total_isogenies();
        let mut total = 0;
        let mut m = 0;

        while total < target {
            let nb = self.batches.len();
            m = (m + 1) % nb;
            if !self.metrics.merged && self.metrics.rounds == self.params.my * nb {
                self.merge_batches();
                m = 0;
            }

            total += self.round(m, rng);
            self.metrics.rounds += 1;
            trace!(
                "{} round {}: batch {m}, {total}/{target} isogenies",
                P::NAME,
                self.metrics.rounds
            );
        }

        self.exponents.zeroize();
        debug!("{} action done: {}", P::NAME, self.metrics);

        (self.curve, self.metrics)
    }
}
