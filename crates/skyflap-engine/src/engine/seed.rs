use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 128-bit seed for the deterministic random streams of the world.
///
/// A seed fixes the obstacle layout of a [`PipeField`](crate::PipeField) and,
/// in training, the whole sequence of mutations and generation layouts.
/// It is written and parsed as a 32-character hex string.
///
/// # Example
///
/// ```
/// use skyflap_engine::Seed;
///
/// let seed: Seed = "000000000000000000000000000000ff".parse().unwrap();
/// assert_eq!(seed.to_string(), "000000000000000000000000000000ff");
/// assert!("xyz".parse::<Seed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl Seed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Builds a seed from a small integer, convenient for tests and CLI flags.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self((value as u128).to_be_bytes())
    }

    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for Seed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows drawing fresh seeds with `rng.random()`.
impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        Seed(seed)
    }
}
