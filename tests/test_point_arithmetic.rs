#![allow(non_snake_case)]
#![allow(incomplete_features)]
#![feature(generic_const_exprs)]

#[cfg(test)]
mod test_point_arithmetic {
    use csidh::elliptic::curve::EdwardsCurve;
    use csidh::elliptic::isogeny::KernelTable;
    use csidh::elliptic::point::PointY;
    use csidh::fields::csidh::Csidh512 as Fp;
    use csidh::protocols::csidh_parameters::CSIDH_512_PRIMES as PRIMES;
    use csidh::utilities::drng::DRNG;
    use fp2::traits::Fp as FpTrait;

    fn base_curve() -> EdwardsCurve<Fp> {
        EdwardsCurve::new(&Fp::TWO, &Fp::FOUR)
    }

    /// A curve 3-isogenous to E0, whose Montgomery coefficient is not zero.
    fn neighbour_curve(rng: &mut DRNG) -> EdwardsCurve<Fp> {
        let E = base_curve();
        let i = 68;
        assert_eq!(PRIMES.primes[i], 3);
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
                return KernelTable::<Fp, 4>::new().build(&E, &K, 3);
            }
        }
    }

    /// [l]P by l - 1 differential additions
    fn naive_multiple(E: &EdwardsCurve<Fp>, P: &PointY<Fp>, l: u32) -> PointY<Fp> {
        let mut prev = *P;
        let mut cur = E.ydbl(P);
        for _ in 2..l {
            let next = EdwardsCurve::yadd(&cur, P, &prev);
            prev = cur;
            cur = next;
        }
        cur
    }

    /// Montgomery x^3 + A x^2 + x at the point with Edwards y = Y / Z.
    fn montgomery_rhs(E: &EdwardsCurve<Fp>, P: &PointY<Fp>) -> Fp {
        let (A, C) = E.montgomery_constants();
        let A = A / C;
        let x = (P.Z + P.Y) / (P.Z - P.Y);
        x * (x.square() + A * x + Fp::ONE)
    }

    #[test]
    fn test_ymul_matches_naive() {
        let mut rng = DRNG::from_seed("test_ymul_matches_naive".as_bytes());
        let E = base_curve();
        let (T, _) = E.sample_torsion_points(&mut rng);

        for (l, chain) in PRIMES.primes.iter().zip(PRIMES.chains.iter()) {
            let P = PointY::rand_point(&mut rng);
            let expected = naive_multiple(&E, &P, *l);
            assert!(E.ymul(&P, chain).equals(&expected) == u32::MAX);

            let expected = naive_multiple(&E, &T, *l);
            assert!(E.ymul(&T, chain).equals(&expected) == u32::MAX);
        }
    }

    #[test]
    fn test_ydbl_and_yadd() {
        let mut rng = DRNG::from_seed("test_ydbl_and_yadd".as_bytes());
        let E = neighbour_curve(&mut rng);
        let (P, _) = E.sample_torsion_points(&mut rng);

        // [4]P two ways
        let P2 = E.ydbl(&P);
        let P3 = EdwardsCurve::yadd(&P2, &P, &P);
        let P4 = EdwardsCurve::yadd(&P3, &P, &P2);
        assert!(E.ydbl(&P2).equals(&P4) == u32::MAX);

        // Scaling the projective coordinates changes nothing
        let k = Fp::rand(&mut rng);
        let Q = PointY::new(&(P.Y * k), &(P.Z * k));
        assert!(Q.equals(&P) == u32::MAX);
        assert!(E.ydbl(&Q).equals(&P2) == u32::MAX);
        assert!(PointY::<Fp>::INFINITY.is_infinity() == u32::MAX);
        assert!(P.is_infinity() == 0);
    }

    #[test]
    fn test_torsion_points_have_order_dividing_p_plus_one() {
        let mut rng = DRNG::from_seed("test_torsion_points_order".as_bytes());
        for E in [base_curve(), neighbour_curve(&mut rng)] {
            for _ in 0..5 {
                let (T_plus, T_minus) = E.sample_torsion_points(&mut rng);
                for T in [T_plus, T_minus] {
                    let T = E.ydbl(&E.ydbl(&T));
                    let R = E.ymul_many(&T, PRIMES.chains.iter());
                    assert!(R.is_infinity() == u32::MAX);
                }
            }
        }
    }

    #[test]
    fn test_torsion_points_split_by_field() {
        let mut rng = DRNG::from_seed("test_torsion_points_split".as_bytes());
        for E in [base_curve(), neighbour_curve(&mut rng)] {
            for _ in 0..10 {
                // T+ sits on the curve over GF(p) and T- on its twist
                let (T_plus, T_minus) = E.sample_torsion_points(&mut rng);
                assert!(montgomery_rhs(&E, &T_plus).is_square() == u32::MAX);
                assert!(montgomery_rhs(&E, &T_minus).is_square() == 0);
            }
        }
    }

    #[test]
    fn test_condswap() {
        let mut rng = DRNG::from_seed("test_condswap".as_bytes());
        let P0 = PointY::<Fp>::rand_point(&mut rng);
        let Q0 = PointY::<Fp>::rand_point(&mut rng);
        let (mut P, mut Q) = (P0, Q0);

        PointY::condswap(&mut P, &mut Q, 0);
        assert!(P.equals(&P0) == u32::MAX && Q.equals(&Q0) == u32::MAX);
        PointY::condswap(&mut P, &mut Q, u32::MAX);
        assert!(P.equals(&Q0) == u32::MAX && Q.equals(&P0) == u32::MAX);

        P.set_cond(&Q, 0);
        assert!(P.equals(&Q0) == u32::MAX);
        P.set_cond(&Q, u32::MAX);
        assert!(P.equals(&P0) == u32::MAX);
    }
}
