use std::fmt;

use skyflap_engine::Action;

/// Longest action sequence representable (one bit per tick).
pub const MAX_SEQUENCE_LEN: usize = 64;

/// Largest [`ActionUniverse`] that can be enumerated.
pub const MAX_UNIVERSE_SIZE: u128 = 1 << 20;

/// Fixed-length sequence of per-tick actions, stored as a bitmask.
///
/// Bit `i` set means "flap on tick `i`". Displayed as one digit per tick,
/// first tick first:
///
/// ```
/// use skyflap_strategy::ActionSequence;
///
/// let seq = ActionSequence::from_bits(0b101, 4);
/// assert_eq!(seq.to_string(), "1010");
/// assert_eq!(seq.flap_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSequence {
    bits: u64,
    len: u8,
}

const fn len_mask(len: usize) -> u64 {
    if len >= MAX_SEQUENCE_LEN {
        u64::MAX
    } else {
        (1 << len) - 1
    }
}

impl ActionSequence {
    /// The sequence that never flaps.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`MAX_SEQUENCE_LEN`].
    #[must_use]
    pub const fn idle(len: usize) -> Self {
        Self::from_bits(0, len)
    }

    /// # Panics
    ///
    /// Panics if `len` exceeds [`MAX_SEQUENCE_LEN`] or `bits` has flaps past
    /// the end of the sequence.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: u64, len: usize) -> Self {
        assert!(len <= MAX_SEQUENCE_LEN);
        assert!(bits & !len_mask(len) == 0);
        Self {
            bits,
            len: len as u8,
        }
    }

    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn flap_count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.bits == 0
    }

    /// Action on tick `index`; ticks past the end are idle.
    #[must_use]
    pub fn action_at(&self, index: usize) -> Action {
        Action::from_flap(index < self.len() && (self.bits >> index) & 1 == 1)
    }

    pub fn actions(&self) -> impl ExactSizeIterator<Item = Action> + use<> {
        let seq = *self;
        (0..seq.len()).map(move |i| seq.action_at(i))
    }
}

impl fmt::Display for ActionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in self.actions() {
            f.write_str(if action.is_flap() { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Next larger integer with the same number of set bits (Gosper's hack).
fn next_combination(v: u64) -> Option<u64> {
    let lowest = v & v.wrapping_neg();
    let ripple = v.checked_add(lowest)?;
    Some((((ripple ^ v) >> 2) / lowest) | ripple)
}

/// Number of sequences of length `len` with at most `max_flaps` flaps:
/// `Σ_{i=0..=max_flaps} C(len, i)`.
#[must_use]
pub fn universe_size(len: usize, max_flaps: usize) -> u128 {
    let len = len as u128;
    let mut binomial = 1_u128;
    let mut total = 1_u128;
    for i in 0..(max_flaps as u128).min(len) {
        binomial = binomial * (len - i) / (i + 1);
        total += binomial;
    }
    total
}

/// Every sequence of a given length with a bounded number of flaps, in
/// planner preference order.
///
/// Sequences are ordered by flap count first. Within one flap count they are
/// ordered by ascending bitmask, so for any two sequences the one whose latest
/// flap comes earlier goes first, ties broken by the next-latest flap.
/// The first sequence is always the idle one.
///
/// # Example
///
/// ```
/// use skyflap_strategy::ActionUniverse;
///
/// let universe = ActionUniverse::new(3, 2);
/// let order: Vec<String> = universe.iter().map(ToString::to_string).collect();
/// assert_eq!(order, ["000", "100", "010", "001", "110", "101", "011"]);
/// ```
#[derive(Debug, Clone)]
pub struct ActionUniverse {
    len: usize,
    max_flaps: usize,
    sequences: Vec<ActionSequence>,
}

impl ActionUniverse {
    /// # Panics
    ///
    /// Panics if `len` exceeds [`MAX_SEQUENCE_LEN`], `max_flaps > len`, or
    /// the universe holds more than [`MAX_UNIVERSE_SIZE`] sequences.
    #[must_use]
    pub fn new(len: usize, max_flaps: usize) -> Self {
        assert!(len <= MAX_SEQUENCE_LEN);
        assert!(max_flaps <= len);
        let size = universe_size(len, max_flaps);
        assert!(
            size <= MAX_UNIVERSE_SIZE,
            "{size} sequences of length {len} exceed the enumeration limit"
        );
        let capacity = usize::try_from(size).unwrap_or(usize::MAX);
        let mut sequences = Vec::with_capacity(capacity);
        let limit = len_mask(len);
        sequences.push(ActionSequence::idle(len));
        for flaps in 1..=max_flaps {
            let mut bits = len_mask(flaps);
            loop {
                sequences.push(ActionSequence::from_bits(bits, len));
                match next_combination(bits) {
                    Some(next) if next & !limit == 0 => bits = next,
                    _ => break,
                }
            }
        }
        Self {
            len,
            max_flaps,
            sequences,
        }
    }

    #[must_use]
    pub fn sequence_len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn max_flaps(&self) -> usize {
        self.max_flaps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&ActionSequence> {
        self.sequences.get(rank)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ActionSequence> + '_ {
        self.sequences.iter()
    }
}
