//! Deterministic byte-level input mutation.
//!
//! # Example
//!
//! ```
//! use covfuzz::{Mutator, MutatorConfig, Seed};
//!
//! let mut mutator = Mutator::with_config(Seed::from_u64(12345), MutatorConfig::default());
//! let child = mutator.mutate(b"1+2\n", None);
//! assert!(child.len() <= MutatorConfig::default().max_len);
//! ```

/// Deterministic seed for reproducible campaigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }
}

/// Simple xorshift64 PRNG
#[derive(Debug, Clone)]
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const fn new(seed: Seed) -> Self {
        // Ensure non-zero state
        let state = if seed.0 == 0 { 1 } else { seed.0 };
        Self { state }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `0..bound`; 0 when `bound` is 0
    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next() % bound as u64) as usize
    }

    /// Value in `min..=max`
    fn between(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        min + self.below(max - min + 1)
    }

    fn byte(&mut self) -> u8 {
        self.next() as u8
    }
}

/// Tokens inserted by [`Mutation::InsertToken`]
const INTERESTING_TOKENS: &[&[u8]] = &[
    b"0",
    b"1",
    b"-1",
    b"+",
    b"-",
    b"\n",
    b" ",
    b"1000",
    b"1001",
    b"65535",
    b"2147483647",
    b"-2147483648",
    b"4294967296",
    b"99999999999999999999",
];

/// A single mutation operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Flip one bit
    FlipBit,
    /// Overwrite one byte with a random value
    RandomByte,
    /// Insert an interesting token at a random position
    InsertToken,
    /// Remove a random range
    DeleteRange,
    /// Copy a random range to another position
    DuplicateRange,
    /// Replace an ASCII digit with a different digit
    TweakDigit,
    /// Join a prefix of the input with a suffix of another corpus entry
    Splice,
}

impl Mutation {
    /// Every operator, in selection order
    pub const ALL: [Self; 7] = [
        Self::FlipBit,
        Self::RandomByte,
        Self::InsertToken,
        Self::DeleteRange,
        Self::DuplicateRange,
        Self::TweakDigit,
        Self::Splice,
    ];
}

/// Mutator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutatorConfig {
    /// Generated inputs are truncated to this length
    pub max_len: usize,
    /// At most this many operators are stacked per input
    pub max_stacked: u32,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            max_len: 4_096,
            max_stacked: 4,
        }
    }
}

/// Generates new inputs from corpus entries
#[derive(Debug, Clone)]
pub struct Mutator {
    rng: Xorshift64,
    config: MutatorConfig,
    inputs_generated: u64,
}

impl Mutator {
    /// Create a mutator with default settings
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self::with_config(seed, MutatorConfig::default())
    }

    /// Create a mutator with custom settings
    #[must_use]
    pub const fn with_config(seed: Seed, config: MutatorConfig) -> Self {
        Self {
            rng: Xorshift64::new(seed),
            config,
            inputs_generated: 0,
        }
    }

    /// Pick an index into a collection of `len` items
    pub fn pick(&mut self, len: usize) -> usize {
        self.rng.below(len)
    }

    /// Derive a new input by stacking one or more random mutations.
    ///
    /// `donor` feeds [`Mutation::Splice`]; without it a token is inserted
    /// instead.
    pub fn mutate(&mut self, input: &[u8], donor: Option<&[u8]>) -> Vec<u8> {
        let mut data = input.to_vec();
        let rounds = self.rng.between(1, self.config.max_stacked.max(1) as usize);
        for _ in 0..rounds {
            let mutation = Mutation::ALL[self.rng.below(Mutation::ALL.len())];
            self.apply(mutation, &mut data, donor);
        }
        data.truncate(self.config.max_len);
        self.inputs_generated += 1;
        data
    }

    /// Apply one operator in place
    pub fn apply(&mut self, mutation: Mutation, data: &mut Vec<u8>, donor: Option<&[u8]>) {
        if data.is_empty() && !matches!(mutation, Mutation::InsertToken | Mutation::Splice) {
            self.insert_token(data);
            return;
        }

        match mutation {
            Mutation::FlipBit => {
                let idx = self.rng.below(data.len());
                data[idx] ^= 1 << self.rng.below(8);
            }
            Mutation::RandomByte => {
                let idx = self.rng.below(data.len());
                data[idx] = self.rng.byte();
            }
            Mutation::InsertToken => self.insert_token(data),
            Mutation::DeleteRange => {
                let start = self.rng.below(data.len());
                let len = self.rng.between(1, data.len() - start);
                data.drain(start..start + len);
            }
            Mutation::DuplicateRange => {
                let start = self.rng.below(data.len());
                let len = self.rng.between(1, (data.len() - start).min(64));
                let chunk = data[start..start + len].to_vec();
                let at = self.rng.below(data.len() + 1);
                data.splice(at..at, chunk);
            }
            Mutation::TweakDigit => self.tweak_digit(data),
            Mutation::Splice => match donor {
                Some(other) if !other.is_empty() => {
                    let cut = self.rng.below(data.len() + 1);
                    let from = self.rng.below(other.len());
                    data.truncate(cut);
                    data.extend_from_slice(&other[from..]);
                }
                _ => self.insert_token(data),
            },
        }
    }

    fn insert_token(&mut self, data: &mut Vec<u8>) {
        let token = INTERESTING_TOKENS[self.rng.below(INTERESTING_TOKENS.len())];
        let at = self.rng.below(data.len() + 1);
        data.splice(at..at, token.iter().copied());
    }

    fn tweak_digit(&mut self, data: &mut Vec<u8>) {
        let digits: Vec<usize> = data
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_ascii_digit())
            .map(|(i, _)| i)
            .collect();

        if digits.is_empty() {
            let at = self.rng.below(data.len() + 1);
            data.insert(at, b'0' + self.rng.below(10) as u8);
            return;
        }

        let idx = digits[self.rng.below(digits.len())];
        let current = data[idx] - b'0';
        let shift = 1 + self.rng.below(9) as u8;
        data[idx] = b'0' + (current + shift) % 10;
    }

    /// Number of inputs produced by [`mutate`](Self::mutate)
    #[must_use]
    pub const fn inputs_generated(&self) -> u64 {
        self.inputs_generated
    }
}
