use fp2::traits::Fp as FqTrait;
use rand_core::{CryptoRng, RngCore};

/// Projective Edwards y-only representation of a point, y = Y / Z.
/// A given y matches the pair of points (x, y) and (-x, y), which is
/// all the isogeny formulas need.
#[derive(Clone, Copy, Debug)]
pub struct PointY<Fq: FqTrait> {
    pub Y: Fq,
    pub Z: Fq,
}

impl<Fq: FqTrait> PointY<Fq> {
    /// The neutral point (0, 1) of the Edwards group law.
    pub const INFINITY: Self = Self {
        Y: <Fq>::ONE,
        Z: <Fq>::ONE,
    };

    /// Create a point from coordinates. WARNING: no check is made on the point.
    pub fn new(Y: &Fq, Z: &Fq) -> Self {
        Self { Y: *Y, Z: *Z }
    }

    pub const fn from_y_coord(Y: &Fq) -> Self {
        Self { Y: *Y, Z: Fq::ONE }
    }

    /// The neutral point is any (Y : Z) with Y == Z.
    /// Returns 0xFFFFFFFF if Y == Z and 0 otherwise
    pub fn is_infinity(&self) -> u32 {
        (self.Y - self.Z).is_zero()
    }

    /// Returns the affine `y` coordinate of a point
    pub fn y(&self) -> Fq {
        self.Y / self.Z
    }

    /// Return 0xFFFFFFFF if self and rhs represent the same y-coordinate,
    /// by comparing Y1 * Z2 and Z1 * Y2. Otherwise, return 0x00000000.
    pub fn equals(&self, rhs: &PointY<Fq>) -> u32 {
        (self.Y * rhs.Z).equals(&(self.Z * rhs.Y))
    }

    /// Swap P and Q when ctl == 0xFFFFFFFF, do nothing when ctl == 0.
    #[inline]
    pub fn condswap(P: &mut Self, Q: &mut Self, ctl: u32) {
        Fq::condswap(&mut P.Y, &mut Q.Y, ctl);
        Fq::condswap(&mut P.Z, &mut Q.Z, ctl);
    }

    /// Copy rhs into self if ctl == `0xFFFFFFFF`.
    /// Do nothing is ctl == `0x00000000`.
    #[inline]
    pub fn set_cond(&mut self, rhs: &Self, ctl: u32) {
        self.Y.set_cond(&rhs.Y, ctl);
        self.Z.set_cond(&rhs.Z, ctl);
    }

    /// Return a new random y-only point with Z = 1.
    pub fn rand_point<R: CryptoRng + RngCore>(rng: &mut R) -> PointY<Fq> {
        let y = Fq::rand(rng);
        PointY::from_y_coord(&y)
    }
}

impl<Fq: FqTrait> ::std::fmt::Display for PointY<Fq> {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "PointY: ({} : {})", self.Y, self.Z)
    }
}
