use fp2::traits::Fp as FqTrait;

/// Twisted Edwards curve a*x^2 + y^2 = 1 + d*x^2*y^2, stored through the
/// two constants every y-only formula needs: a and (a - d).
///
/// The pair is projective: (a : a - d) and (k*a : k*(a - d)) describe
/// isomorphic curves, and the normalised ratio a / (a - d) is the curve
/// invariant used as the shared secret.
#[derive(Clone, Copy, Debug)]
pub struct EdwardsCurve<Fq: FqTrait> {
    pub a: Fq,  // a
    pub ad: Fq, // a - d
}

impl<Fq: FqTrait> EdwardsCurve<Fq> {
    /// Create a curve from the constants a and (a - d).
    /// WARNING: no check is made on the curve, see `is_singular()`.
    pub const fn new(a: &Fq, ad: &Fq) -> Self {
        Self { a: *a, ad: *ad }
    }

    /// The constant d = a - (a - d).
    pub fn d(&self) -> Fq {
        self.a - self.ad
    }

    /// Returns 0xFFFFFFFF when a = 0, d = 0 or a = d, i.e. when the constants
    /// do not describe an elliptic curve. Returns 0 otherwise.
    pub fn is_singular(&self) -> u32 {
        self.a.is_zero() | self.ad.is_zero() | self.d().is_zero()
    }

    /// Projective Montgomery constants (A' : C') = (2*(a + d) : a - d) of
    /// the isomorphic Montgomery curve.
    pub fn montgomery_constants(&self) -> (Fq, Fq) {
        ((self.a + self.d()).mul2(), self.ad)
    }

    /// The normalised ratio a / (a - d), equal for isomorphic curves.
    pub fn invariant(&self) -> Fq {
        self.a * self.ad.invert()
    }

    /// Return 0xFFFFFFFF if self and rhs have the same invariant and zero
    /// otherwise. No inversion needed.
    pub fn equals(&self, rhs: &Self) -> u32 {
        (self.a * rhs.ad).equals(&(self.ad * rhs.a))
    }

    /// Copy rhs into self if ctl == `0xFFFFFFFF`.
    #[inline]
    pub fn set_cond(&mut self, rhs: &Self, ctl: u32) {
        self.a.set_cond(&rhs.a, ctl);
        self.ad.set_cond(&rhs.ad, ctl);
    }
}

impl<Fq: FqTrait> ::std::fmt::Display for EdwardsCurve<Fq> {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "EdwardsCurve: (a : a - d) = ({} : {})", self.a, self.ad)
    }
}
