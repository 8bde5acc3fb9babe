#![allow(non_snake_case)]
#![allow(incomplete_features)]
#![feature(generic_const_exprs)]

#[cfg(test)]
mod test_isogeny {
    use csidh::elliptic::curve::EdwardsCurve;
    use csidh::elliptic::isogeny::KernelTable;
    use csidh::elliptic::point::PointY;
    use csidh::fields::csidh::Csidh512 as Fp;
    use csidh::protocols::csidh_parameters::{CSIDH_512_PRIMES as PRIMES, MAX_KERNEL_POINTS};
    use csidh::protocols::validate::validate;
    use csidh::utilities::drng::DRNG;
    use fp2::traits::Fp as FpTrait;

    fn base_curve() -> EdwardsCurve<Fp> {
        EdwardsCurve::new(&Fp::TWO, &Fp::FOUR)
    }

    fn index_of(l: u32) -> usize {
        PRIMES.primes.iter().position(|x| *x == l).unwrap()
    }

    /// A point of order exactly l on E.
    fn kernel_point(E: &EdwardsCurve<Fp>, l: u32, rng: &mut DRNG) -> PointY<Fp> {
        let i = index_of(l);
        loop {
            let (T, _) = E.sample_torsion_points(rng);
            let T = E.ydbl(&E.ydbl(&T));
            let K = E.ymul_many(
                &T,
                PRIMES
                    .chains
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, c)| c),
            );
            if K.is_infinity() == 0 {
                assert!(E.ymul(&K, &PRIMES.chains[i]).is_infinity() == u32::MAX);
                return K;
            }
        }
    }

    /// d' / a' = (d / a)^l * prod_{j = 1}^{s} y([j]K)^8, computed affinely.
    fn expected_codomain_ratio(E: &EdwardsCurve<Fp>, K: &PointY<Fp>, l: u32) -> Fp {
        let ratio = E.d() / E.a;
        let mut out = Fp::ONE;
        for _ in 0..l {
            out *= ratio;
        }

        let mut prev = PointY::INFINITY;
        let mut cur = *K;
        for j in 1..=(l >> 1) {
            let y = cur.y();
            let y2 = y.square();
            let y4 = y2.square();
            out *= y4.square();
            let next = if j == 1 {
                E.ydbl(K)
            } else {
                EdwardsCurve::yadd(&cur, K, &prev)
            };
            prev = cur;
            cur = next;
        }
        out
    }

    #[test]
    fn test_small_degree_codomains() {
        let mut rng = DRNG::from_seed("test_small_degree_codomains".as_bytes());
        let mut E = base_curve();
        let mut table = KernelTable::<Fp, MAX_KERNEL_POINTS>::new();

        // Walk a few steps so that later steps start away from E0
        for l in [3u32, 5, 7, 3, 7, 5] {
            let K = kernel_point(&E, l, &mut rng);
            let E_new = table.build(&E, &K, l);

            let ratio = E_new.d() / E_new.a;
            let expected = expected_codomain_ratio(&E, &K, l);
            assert!(ratio.equals(&expected) == u32::MAX);
            assert!(E_new.is_singular() == 0);

            E = E_new;
        }
        assert!(validate(&E, &PRIMES, &mut rng));
    }

    #[test]
    fn test_kernel_is_killed() {
        let mut rng = DRNG::from_seed("test_kernel_is_killed".as_bytes());
        let E = base_curve();
        let mut table = KernelTable::<Fp, MAX_KERNEL_POINTS>::new();

        for l in [3u32, 5, 7, 11, 587] {
            let K = kernel_point(&E, l, &mut rng);
            table.build(&E, &K, l);

            assert!(table.eval(&K, l).is_infinity() == u32::MAX);
            let K2 = E.ydbl(&K);
            assert!(table.eval(&K2, l).is_infinity() == u32::MAX);

            let (T, _) = E.sample_torsion_points(&mut rng);
            assert!(table.eval(&T, l).is_infinity() == 0);
        }
    }

    #[test]
    fn test_images_are_compatible_with_doubling() {
        let mut rng = DRNG::from_seed("test_images_doubling".as_bytes());
        let E = base_curve();
        let mut table = KernelTable::<Fp, MAX_KERNEL_POINTS>::new();

        for l in [3u32, 5, 7, 13, 101] {
            let K = kernel_point(&E, l, &mut rng);
            let E_new = table.build(&E, &K, l);

            let (T_plus, T_minus) = E.sample_torsion_points(&mut rng);
            for Q in [T_plus, T_minus] {
                let lhs = table.eval(&E.ydbl(&Q), l);
                let rhs = E_new.ydbl(&table.eval(&Q, l));
                assert!(lhs.equals(&rhs) == u32::MAX);

                // Images stay in the p + 1 torsion of the codomain
                let R = E_new.ydbl(&E_new.ydbl(&table.eval(&Q, l)));
                assert!(E_new.ymul_many(&R, PRIMES.chains.iter()).is_infinity() == u32::MAX);
            }
        }
    }

    #[test]
    fn test_multiple_of_generator() {
        let mut rng = DRNG::from_seed("test_multiple_of_generator".as_bytes());
        let E = base_curve();
        let mut table = KernelTable::<Fp, MAX_KERNEL_POINTS>::new();

        for (i, l) in PRIMES.primes.iter().enumerate() {
            let (P, _) = E.sample_torsion_points(&mut rng);
            table.build(&E, &P, *l);
            let expected = E.ymul(&P, &PRIMES.chains[i]);
            assert!(table.multiple_of_generator(&P, *l).equals(&expected) == u32::MAX);

            // The multiples below the spare slot are untouched
            assert!(table.get(0).equals(&P) == u32::MAX);
            assert!(table.get(1).equals(&E.ydbl(&P)) == u32::MAX);
        }
    }
}
