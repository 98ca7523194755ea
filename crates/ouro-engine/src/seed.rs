use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a deterministic game episode.
///
/// This is a 128-bit (16-byte) seed used to initialize the episode's random
/// number generator. Running an episode with the same genes and the same seed
/// reproduces the identical game, enabling:
///
/// - Replaying record-breaking episodes exactly
/// - Deterministic testing
///
/// The textual form is a 32-character hex string; that string is what the
/// seed files under `seed/{score}` contain, verbatim.
///
/// # Example
///
/// ```
/// use ouro_engine::GameSeed;
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
/// let text = seed.to_string();
/// assert_eq!(text.parse::<GameSeed>().unwrap(), seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    pub(crate) fn into_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error returned when a seed string is not a 32-character hex value.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid game seed: expected 32 hex characters")]
pub struct ParseSeedError;

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid game seed: {text}")))
    }
}

/// Allows generating random `GameSeed` values with `rng.random()`.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_32_char_hex() {
        let seed: GameSeed = rand::rng().random();
        let text = seed.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_value_all_zeros() {
        let seed = GameSeed([0; 16]);
        assert_eq!(seed.to_string(), "00000000000000000000000000000000");
    }

    #[test]
    fn test_big_endian_byte_order() {
        let seed = GameSeed([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(seed.to_string().parse::<GameSeed>().unwrap(), seed);
    }

    #[test]
    fn test_parse_roundtrip() {
        let seed: GameSeed = rand::rng().random();
        assert_eq!(seed.to_string().parse::<GameSeed>().unwrap(), seed);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("0123".parse::<GameSeed>().is_err());
        assert!("".parse::<GameSeed>().is_err());
        assert!(
            "0123456789abcdef0123456789abcdef0"
                .parse::<GameSeed>()
                .is_err()
        );
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(
            "ghijklmnopqrstuvwxyzghijklmnopqr"
                .parse::<GameSeed>()
                .is_err()
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let seed: GameSeed = rand::rng().random();
        let json = serde_json::to_string(&seed).unwrap();
        let back: GameSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(seed, back);
    }
}
