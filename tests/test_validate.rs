#![allow(non_snake_case)]
#![allow(incomplete_features)]
#![feature(generic_const_exprs)]

#[cfg(test)]
mod test_validate {
    use csidh::elliptic::curve::EdwardsCurve;
    use csidh::error::CsidhError;
    use csidh::fields::csidh::Csidh512 as Fp;
    use csidh::protocols::csidh_parameters::{
        CSIDH_512_PRIMES as PRIMES, CSIDH_512_WITH_DUMMY_TWO as CSIDH,
    };
    use csidh::protocols::validate::validate;
    use csidh::utilities::drng::DRNG;
    use fp2::traits::Fp as FpTrait;

    #[test]
    fn test_base_curve_is_supersingular() {
        let mut rng = DRNG::from_seed("test_base_curve".as_bytes());
        let E0 = CSIDH.starting_curve().curve;
        for _ in 0..10 {
            assert!(validate(&E0, &PRIMES, &mut rng));
        }

        // Any projective representative of E0 passes as well
        let k = Fp::rand(&mut rng);
        let E = EdwardsCurve::new(&(E0.a * k), &(E0.ad * k));
        assert!(validate(&E, &PRIMES, &mut rng));
    }

    #[test]
    fn test_corrupted_curves_are_rejected() {
        let mut rng = DRNG::from_seed("test_corrupted_curves".as_bytes());
        let (_, pk) = CSIDH.keygen(&mut rng);
        assert!(validate(&pk.curve, &PRIMES, &mut rng));

        for _ in 0..20 {
            let mut E = pk.curve;
            E.a += Fp::rand(&mut rng);
            assert!(!validate(&E, &PRIMES, &mut rng));

            let mut E = pk.curve;
            E.ad += Fp::ONE;
            assert!(!validate(&E, &PRIMES, &mut rng));
        }
    }

    #[test]
    fn test_singular_curves_are_rejected() {
        let mut rng = DRNG::from_seed("test_singular_curves".as_bytes());

        // a = 0, a = d, d = 0 and the all-zero pair
        let singular = [
            EdwardsCurve::new(&Fp::ZERO, &Fp::FOUR),
            EdwardsCurve::new(&Fp::TWO, &Fp::ZERO),
            EdwardsCurve::new(&Fp::FOUR, &Fp::FOUR),
            EdwardsCurve::new(&Fp::ZERO, &Fp::ZERO),
        ];
        for E in singular.iter() {
            assert!(E.is_singular() == u32::MAX);
            assert!(!validate(E, &PRIMES, &mut rng));
            assert!(!CSIDH.validate(E, &mut rng));
        }

        // The check does not depend on the projective representative
        let k = Fp::rand(&mut rng);
        let E = EdwardsCurve::new(&(Fp::FOUR * k), &(Fp::FOUR * k));
        assert!(!validate(&E, &PRIMES, &mut rng));
    }

    #[test]
    fn test_checked_action_rejects_bad_curves() {
        let mut rng = DRNG::from_seed("test_checked_action".as_bytes());
        let sk = CSIDH.sample_secret_key(&mut rng);
        let E0 = CSIDH.starting_curve().curve;

        // a = d
        let singular = EdwardsCurve::new(&Fp::TWO, &Fp::ZERO);
        assert!(matches!(
            CSIDH.evaluate_action_checked(&singular, &sk, &mut rng),
            Err(CsidhError::InvalidCurve)
        ));

        // a = 0
        let singular = EdwardsCurve::new(&Fp::ZERO, &Fp::FOUR);
        assert!(matches!(
            CSIDH.evaluate_action_checked(&singular, &sk, &mut rng),
            Err(CsidhError::InvalidCurve)
        ));

        let ordinary = EdwardsCurve::new(&(E0.a + Fp::ONE), &E0.ad);
        assert!(matches!(
            CSIDH.evaluate_action_checked(&ordinary, &sk, &mut rng),
            Err(CsidhError::InvalidCurve)
        ));

        let E = CSIDH.evaluate_action_checked(&E0, &sk, &mut rng).unwrap();
        assert!(validate(&E, &PRIMES, &mut rng));
    }
}
