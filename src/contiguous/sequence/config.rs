use std::fmt::{self, Display, Formatter};

const DEFAULT_GROWTH_FACTOR: usize = 2;
const MIN_GROWTH_FACTOR: usize = 2;
const DEFAULT_MIN_CAPACITY: usize = 1;

/// The fraction of a Sequence's capacity which, once reached, forces growth on the next push.
///
/// The comparison is done on integers (`len * den >= cap * num`) so that no rounding is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadFactor {
    num: usize,
    den: usize,
}

impl LoadFactor {
    /// Grow once the Sequence is at least half full.
    pub const HALF: LoadFactor = LoadFactor { num: 1, den: 2 };
    /// Grow only once the Sequence is completely full.
    pub const FULL: LoadFactor = LoadFactor { num: 1, den: 1 };

    /// Creates a LoadFactor of `num / den`, returning [`None`] unless `0 < num <= den`.
    pub const fn new(num: usize, den: usize) -> Option<LoadFactor> {
        if num == 0 || num > den {
            None
        } else {
            Some(LoadFactor { num, den })
        }
    }

    /// Returns the numerator.
    pub const fn num(&self) -> usize {
        self.num
    }

    /// Returns the denominator.
    pub const fn den(&self) -> usize {
        self.den
    }

    /// Returns true if a Sequence with `len` elements and `cap` slots has reached this load factor.
    /// An empty Region has always reached it.
    pub const fn is_reached(&self, len: usize, cap: usize) -> bool {
        if cap == 0 {
            return true;
        }
        // Widened so that neither product can overflow.
        (len as u128) * (self.den as u128) >= (cap as u128) * (self.num as u128)
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        LoadFactor::HALF
    }
}

impl Display for LoadFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Per-instance resize configuration for a [`Sequence`](super::Sequence).
///
/// The defaults double the capacity whenever the Sequence is at least half full before an insert,
/// and give a zero-capacity Sequence a single slot on its first push.
///
/// # Examples
/// ```
/// # use owned_sequence::contiguous::{LoadFactor, SequenceConfig};
/// let config = SequenceConfig::new()
///     .growth_factor(3)
///     .load_factor(LoadFactor::FULL)
///     .min_capacity(4);
/// assert_eq!(config.get_growth_factor(), 3);
/// assert_eq!(config.get_min_capacity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceConfig {
    growth_factor: usize,
    load_factor: LoadFactor,
    min_capacity: usize,
}

impl SequenceConfig {
    /// Creates the default configuration.
    pub const fn new() -> SequenceConfig {
        SequenceConfig {
            growth_factor: DEFAULT_GROWTH_FACTOR,
            load_factor: LoadFactor::HALF,
            min_capacity: DEFAULT_MIN_CAPACITY,
        }
    }

    /// Sets the multiplier applied to the capacity on growth. Values below 2 can't guarantee
    /// amortized constant time pushes and are raised to 2.
    pub fn growth_factor(mut self, factor: usize) -> SequenceConfig {
        if factor < MIN_GROWTH_FACTOR {
            log::warn!("growth factor {} is too small, using {}", factor, MIN_GROWTH_FACTOR);
        }
        self.growth_factor = factor.max(MIN_GROWTH_FACTOR);
        self
    }

    /// Sets the load factor at which a push grows the Sequence first.
    pub const fn load_factor(mut self, load_factor: LoadFactor) -> SequenceConfig {
        self.load_factor = load_factor;
        self
    }

    /// Sets the capacity allocated when a zero-capacity Sequence receives its first push. Zero is
    /// raised to 1.
    pub fn min_capacity(mut self, cap: usize) -> SequenceConfig {
        if cap == 0 {
            log::warn!("minimum capacity can't be 0, using 1");
        }
        self.min_capacity = cap.max(1);
        self
    }

    /// Returns the growth factor.
    pub const fn get_growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Returns the load factor.
    pub const fn get_load_factor(&self) -> LoadFactor {
        self.load_factor
    }

    /// Returns the minimum capacity.
    pub const fn get_min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Returns true if a Sequence with `len` elements and `cap` slots must grow before its next
    /// insert.
    pub const fn needs_growth(&self, len: usize, cap: usize) -> bool {
        self.load_factor.is_reached(len, cap)
    }

    /// Returns the capacity to grow to from `cap`, or [`None`] if it would overflow.
    pub const fn grown_cap(&self, cap: usize) -> Option<usize> {
        if cap == 0 {
            Some(self.min_capacity)
        } else {
            cap.checked_mul(self.growth_factor)
        }
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new()
    }
}
