use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::PieceKind;

/// Supplies the kind of each newly spawned piece.
pub trait PieceSource: fmt::Debug {
    /// Returns the kind of the next piece to spawn.
    fn next_kind(&mut self) -> PieceKind;
}

impl<P> PieceSource for Box<P>
where
    P: PieceSource + ?Sized,
{
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Picks every piece independently and uniformly at random.
///
/// There is no bag: the same kind may come up any number of times in a row.
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: Pcg32,
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieces {
    /// Creates a source seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_os_rng(),
        }
    }

    /// Creates a source that yields the same sequence for the same seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Cycles through a fixed, non-empty sequence of kinds.
///
/// # Example
///
/// ```
/// use blockfall_engine::{FixedPieces, PieceKind, PieceSource};
///
/// let mut pieces = FixedPieces::new([PieceKind::O, PieceKind::I]);
/// assert_eq!(pieces.next_kind(), PieceKind::O);
/// assert_eq!(pieces.next_kind(), PieceKind::I);
/// assert_eq!(pieces.next_kind(), PieceKind::O);
/// ```
#[derive(Debug, Clone)]
pub struct FixedPieces {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl FixedPieces {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for FixedPieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RandomPieces::from_seed(7);
        let mut b = RandomPieces::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_random_covers_all_kinds() {
        let mut pieces = RandomPieces::from_seed(42);
        let seen: HashSet<_> = (0..1000).map(|_| pieces.next_kind()).collect();
        assert_eq!(seen.len(), PieceKind::LEN);
    }

    #[test]
    fn test_fixed_single_kind_repeats() {
        let mut pieces = FixedPieces::new([PieceKind::T]);
        for _ in 0..5 {
            assert_eq!(pieces.next_kind(), PieceKind::T);
        }
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_fixed_empty_panics() {
        let _ = FixedPieces::new([]);
    }
}
