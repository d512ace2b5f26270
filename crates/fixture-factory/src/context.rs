//! Random contexts handed to factory definitions.
//!
//! A [`RandomContext`] is a stateful generator of random primitives. Each
//! `create` call gets a fresh context; a `create_many` call shares one context
//! across every fixture it builds. Contexts can be seeded so that fixtures are
//! reproducible.

use fake::Fake;
use fake::faker::internet::raw::SafeEmail;
use fake::faker::lorem::raw::Word;
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::locales::EN;
use rand::distr::{Alphanumeric, SampleString};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Radix used for [`RandomContext::hash`] digits.
const HASH_RADIX: u32 = 16;

/// A random-value provider passed to factory definitions.
///
/// # Example
///
/// ```
/// use fixture_factory::RandomContext;
///
/// let mut context = RandomContext::seeded(7);
/// let api_key = context.hash(24);
///
/// assert_eq!(api_key.len(), 24);
/// assert!(api_key.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[derive(Debug, Clone)]
pub struct RandomContext {
    rng: ChaCha8Rng,
}

impl RandomContext {
    /// Creates a context seeded from the thread-local entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Creates a deterministic context from a seed value.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns a lowercase hexadecimal string of `length` characters.
    pub fn hash(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| {
                let digit = self.rng.random_range(0..HASH_RADIX);
                char::from_digit(digit, HASH_RADIX).unwrap_or('0')
            })
            .collect()
    }

    /// Returns an ASCII alphanumeric string of `length` characters.
    pub fn string(&mut self, length: usize) -> String {
        Alphanumeric.sample_string(&mut self.rng, length)
    }

    /// Returns an integer in the inclusive range between `min` and `max`.
    ///
    /// Reversed bounds are swapped rather than rejected.
    pub fn integer(&mut self, min: i64, max: i64) -> i64 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(low..=high)
    }

    /// Returns a random boolean.
    pub fn boolean(&mut self) -> bool {
        self.rng.random()
    }

    /// Picks one element of `items`, or `None` when `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Returns a random version 4 UUID.
    pub fn uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.random()).into_uuid()
    }

    /// Returns a fake first name.
    pub fn first_name(&mut self) -> String {
        FirstName(EN).fake_with_rng(&mut self.rng)
    }

    /// Returns a fake last name.
    pub fn last_name(&mut self) -> String {
        LastName(EN).fake_with_rng(&mut self.rng)
    }

    /// Returns a fake full name.
    pub fn name(&mut self) -> String {
        Name(EN).fake_with_rng(&mut self.rng)
    }

    /// Returns a fake email address on a reserved example domain.
    pub fn safe_email(&mut self) -> String {
        SafeEmail(EN).fake_with_rng(&mut self.rng)
    }

    /// Returns a fake lorem-ipsum word.
    pub fn word(&mut self) -> String {
        Word(EN).fake_with_rng(&mut self.rng)
    }

    /// Exposes the underlying generator for other `rand` or `fake` use.
    pub const fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl Default for RandomContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a factory draws its random contexts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContextSource {
    /// Every context is seeded from fresh entropy.
    #[default]
    Entropy,
    /// Every context starts from the same seed, so builds are reproducible.
    Seeded(u64),
}

impl ContextSource {
    /// Creates a new random context from this source.
    #[must_use]
    pub fn context(self) -> RandomContext {
        match self {
            Self::Entropy => RandomContext::new(),
            Self::Seeded(seed) => RandomContext::seeded(seed),
        }
    }
}

impl From<Option<u64>> for ContextSource {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::Seeded)
    }
}
