use std::marker::PhantomData;

use fp2::traits::Fp as FqTrait;
use log::{debug, warn};
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::csidh_parameters::{NUM_PRIMES, PrimeTable, SimbaParameters};
use super::policy::SimbaPolicy;
use super::simba::{ActionMetrics, Simba};
use super::validate::validate;
use crate::elliptic::curve::EdwardsCurve;
use crate::error::CsidhError;
use crate::utilities::le_bytes::le_to_be_bytes;

/// Public parameters of a CSIDH instance: the prime factorisation of
/// (p + 1)/4, the SIMBA batching and bounds, and the exponent policy P.
#[derive(Clone, Copy, Debug)]
pub struct Csidh<Fq: FqTrait, P: SimbaPolicy> {
    primes: &'static PrimeTable,
    simba: &'static SimbaParameters,
    base: EdwardsCurve<Fq>,
    _policy: PhantomData<P>,
}

/// Packed private exponents, one byte per prime in the public prime order.
/// The packing depends on the policy the key was sampled for.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CsidhPrivateKey {
    e: [u8; NUM_PRIMES],
}

/// A public key is the curve reached from the base curve.
#[derive(Clone, Copy, Debug)]
pub struct CsidhPublicKey<Fq: FqTrait> {
    pub curve: EdwardsCurve<Fq>,
}

/// The shared secret a / (a - d) of the curve both parties end up on.
#[derive(Clone, Copy, Debug)]
pub struct SharedSecret<Fq: FqTrait>(Fq);

impl CsidhPrivateKey {
    pub const ENCODED_LENGTH: usize = NUM_PRIMES;

    pub fn as_bytes(&self) -> &[u8] {
        &self.e
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.e)
    }
}

impl ::std::fmt::Debug for CsidhPrivateKey {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.write_str("CsidhPrivateKey { .. }")
    }
}

impl<Fq: FqTrait> CsidhPublicKey<Fq>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    pub const ENCODED_LENGTH: usize = 2 * Fq::ENCODED_LENGTH;
    pub const COMPRESSED_LENGTH: usize = Fq::ENCODED_LENGTH;

    /// Encode the curve as encode(a) || encode(a - d).
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LENGTH);
        buf.extend_from_slice(&self.curve.a.encode());
        buf.extend_from_slice(&self.curve.ad.encode());
        buf
    }

    /// Encode only the invariant a / (a - d). This costs an inversion.
    pub fn encode_compressed(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::COMPRESSED_LENGTH);
        buf.extend_from_slice(&self.curve.invariant().encode());
        buf
    }

    fn decode_field_element(buf: &[u8], what: &'static str) -> Result<Fq, CsidhError> {
        let (x, check) = Fq::decode(buf);
        if check != u32::MAX {
            return Err(CsidhError::NonCanonicalEncoding { what });
        }
        Ok(x)
    }

    /// Decode either the full or the compressed encoding. The compressed
    /// form decodes to the curve (r : 1).
    pub fn decode(buf: &[u8]) -> Result<Self, CsidhError> {
        let n = Fq::ENCODED_LENGTH;
        let curve = if buf.len() == Self::ENCODED_LENGTH {
            let a = Self::decode_field_element(&buf[..n], "curve constant a")?;
            let ad = Self::decode_field_element(&buf[n..], "curve constant a - d")?;
            EdwardsCurve::new(&a, &ad)
        } else if buf.len() == Self::COMPRESSED_LENGTH {
            let r = Self::decode_field_element(buf, "curve invariant")?;
            EdwardsCurve::new(&r, &Fq::ONE)
        } else {
            return Err(CsidhError::MalformedInput {
                what: "public key",
                expected: Self::ENCODED_LENGTH,
                actual: buf.len(),
            });
        };

        Ok(Self { curve })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    pub fn from_hex(s: &str) -> Result<Self, CsidhError> {
        Self::decode(&hex::decode(s.trim())?)
    }
}

impl<Fq: FqTrait> SharedSecret<Fq>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    pub fn value(&self) -> Fq {
        self.0
    }

    /// Big endian bytes of the secret.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        le_to_be_bytes(&self.0.encode())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes_be())
    }

    /// Return 0xFFFFFFFF when both secrets agree and zero otherwise.
    pub fn equals(&self, rhs: &Self) -> u32 {
        self.0.equals(&rhs.0)
    }
}

impl<Fq: FqTrait> PartialEq for SharedSecret<Fq>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other) == u32::MAX
    }
}

impl<Fq: FqTrait> ::std::fmt::Display for SharedSecret<Fq>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<Fq: FqTrait, P: SimbaPolicy> Csidh<Fq, P>
where
    [(); Fq::ENCODED_LENGTH]:,
{
    pub const fn new(primes: &'static PrimeTable, simba: &'static SimbaParameters) -> Self {
        Self {
            primes,
            simba,
            // E0 : y^2 = x^3 + x as an Edwards curve with (a : a - d) = (2 : 4)
            base: EdwardsCurve::new(&Fq::TWO, &Fq::FOUR),
            _policy: PhantomData,
        }
    }

    pub const fn starting_curve(&self) -> CsidhPublicKey<Fq> {
        CsidhPublicKey { curve: self.base }
    }

    pub fn policy_name(&self) -> &'static str {
        P::NAME
    }

    pub fn primes(&self) -> &[u32; NUM_PRIMES] {
        &self.primes.primes
    }

    /// The number of isogenies of each degree built by one action.
    pub fn bounds(&self) -> &[u8; NUM_PRIMES] {
        &self.simba.bounds
    }

    pub fn total_isogenies(&self) -> usize {
        self.simba.total_isogenies()
    }

    pub fn sample_secret_key<R: CryptoRng + RngCore>(&self, rng: &mut R) -> CsidhPrivateKey {
        let mut e = [0u8; NUM_PRIMES];
        for (ei, bound) in e.iter_mut().zip(self.simba.bounds.iter()) {
            *ei = P::sample_exponent(rng, *bound);
        }
        CsidhPrivateKey { e }
    }

    /// Parse a packed private key, checking every exponent against the
    /// bounds of this instance.
    pub fn decode_private_key(&self, buf: &[u8]) -> Result<CsidhPrivateKey, CsidhError> {
        if buf.len() != NUM_PRIMES {
            return Err(CsidhError::MalformedInput {
                what: "private key",
                expected: NUM_PRIMES,
                actual: buf.len(),
            });
        }

        let mut sk = CsidhPrivateKey { e: [0u8; NUM_PRIMES] };
        sk.e.copy_from_slice(buf);
        for (index, (byte, bound)) in sk.e.iter().zip(self.simba.bounds.iter()).enumerate() {
            if !P::is_valid_exponent(*byte, *bound) {
                return Err(CsidhError::ExponentOutOfRange {
                    index,
                    value: P::decode_exponent(*byte),
                });
            }
        }

        Ok(sk)
    }

    pub fn private_key_from_hex(&self, s: &str) -> Result<CsidhPrivateKey, CsidhError> {
        let mut bytes = hex::decode(s.trim())?;
        let sk = self.decode_private_key(&bytes);
        bytes.zeroize();
        sk
    }

    /// The signed exponents held by a private key.
    pub fn exponents(&self, sk: &CsidhPrivateKey) -> [i16; NUM_PRIMES] {
        sk.e.map(P::decode_exponent)
    }

    /// Render the exponents as `{ e_0, e_1, ... }`, 18 to a line.
    pub fn render_private_key(&self, sk: &CsidhPrivateKey) -> String {
        let mut out = String::from("{");
        for (i, e) in self.exponents(sk).iter().enumerate() {
            if i > 0 {
                out.push(',');
                if i % 18 == 0 {
                    out.push_str("\n ");
                }
            }
            out.push_str(&format!(" {e:3}"));
        }
        out.push_str(" }");
        out
    }

    /// Evaluate the action of the ideal class encoded by `sk` on E.
    ///
    /// The number of isogenies built is fixed by the public bounds, so the
    /// running time does not depend on the exponents. E is trusted, see
    /// `evaluate_action_checked()` for curves from the wire.
    pub fn evaluate_action<R: CryptoRng + RngCore>(
        &self,
        E: &EdwardsCurve<Fq>,
        sk: &CsidhPrivateKey,
        rng: &mut R,
    ) -> EdwardsCurve<Fq> {
        self.evaluate_action_with_metrics(E, sk, rng).0
    }

    pub fn evaluate_action_with_metrics<R: CryptoRng + RngCore>(
        &self,
        E: &EdwardsCurve<Fq>,
        sk: &CsidhPrivateKey,
        rng: &mut R,
    ) -> (EdwardsCurve<Fq>, ActionMetrics) {
        Simba::<Fq, P>::new(self.primes, self.simba, E, &sk.e).run(rng)
    }

    /// Returns true when E is supersingular. Singular curves are rejected.
    pub fn validate<R: CryptoRng + RngCore>(&self, E: &EdwardsCurve<Fq>, rng: &mut R) -> bool {
        validate(E, self.primes, rng)
    }

    /// Validate E and only then evaluate the action on it.
    pub fn evaluate_action_checked<R: CryptoRng + RngCore>(
        &self,
        E: &EdwardsCurve<Fq>,
        sk: &CsidhPrivateKey,
        rng: &mut R,
    ) -> Result<EdwardsCurve<Fq>, CsidhError> {
        if !self.validate(E, rng) {
            warn!("rejecting curve which is not supersingular");
            return Err(CsidhError::InvalidCurve);
        }

        Ok(self.evaluate_action(E, sk, rng))
    }

    pub fn keygen<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> (CsidhPrivateKey, CsidhPublicKey<Fq>) {
        let sk = self.sample_secret_key(rng);
        let curve = self.evaluate_action(&self.base, &sk, rng);
        debug!("{} key pair generated", P::NAME);

        (sk, CsidhPublicKey { curve })
    }

    /// Act with our private key on the other party's validated public curve.
    pub fn derive_shared_secret<R: CryptoRng + RngCore>(
        &self,
        pk: &CsidhPublicKey<Fq>,
        sk: &CsidhPrivateKey,
        rng: &mut R,
    ) -> Result<SharedSecret<Fq>, CsidhError> {
        let curve = self.evaluate_action_checked(&pk.curve, sk, rng)?;
        Ok(SharedSecret(curve.invariant()))
    }
}
