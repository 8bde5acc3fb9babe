//! Deterministic random number generator for tests and benchmarks.
//!
//! The output stream is SHAKE256 of the seed, so two generators built from
//! the same seed produce identical streams. Never use this for real keys.

use rand_core::{CryptoRng, Error, RngCore};
use sha3::{
    Shake256, Shake256Reader,
    digest::{ExtendableOutput, Update, XofReader},
};

pub struct DRNG {
    reader: Shake256Reader,
}

impl DRNG {
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut shake = Shake256::default();
        shake.update(seed);
        Self {
            reader: shake.finalize_xof(),
        }
    }
}

impl RngCore for DRNG {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.reader.read(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.reader.read(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.reader.read(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for DRNG {}
