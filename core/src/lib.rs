use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod card;
mod deck;
mod engine;
mod error;
mod generator;
mod score;
mod session;
mod types;

/// Grid used by the classic variant.
pub const CLASSIC_SIZE: Coord2 = (4, 4);

/// Delay between revealing the second card and comparing the pair in the classic variant.
pub const CLASSIC_CHECK_DELAY: Duration = Duration::from_millis(1000);

pub const DEFAULT_SIZE: Coord2 = (2, 4);
pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

/// Grid shape and pacing of a game.
///
/// `check_delay` is how long a freshly revealed pair stays up before it gets compared, and
/// `mismatch_delay` is how long a mismatched pair stays up after the comparison. Clicks are
/// locked during both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    #[serde(with = "duration_ms")]
    pub check_delay: Duration,
    #[serde(with = "duration_ms")]
    pub mismatch_delay: Duration,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self {
            size,
            check_delay: DEFAULT_CHECK_DELAY,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
        }
    }

    /// Configurable variant, fails when the grid cannot be filled with pairs.
    pub fn new(size: Coord2) -> Result<Self> {
        let config = Self::new_unchecked(size);
        config.validate()?;
        Ok(config)
    }

    /// Fixed 4x4 variant: compare after a second, hide mismatches right away.
    pub const fn classic() -> Self {
        Self {
            size: CLASSIC_SIZE,
            check_delay: CLASSIC_CHECK_DELAY,
            mismatch_delay: Duration::ZERO,
        }
    }

    pub const fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    pub const fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidGridSize { rows, cols });
        }
        if self.total_cards() % 2 != 0 {
            return Err(GameError::OddCardCount { rows, cols });
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cards(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cards() / 2
    }

    pub const fn pos_of(&self, coords: Coord2) -> Option<Pos> {
        pos_of(coords, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE)
    }
}

mod duration_ms {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click was not accepted, nothing changed.
    Ignored,
    /// First card of the turn is face-up.
    Revealed,
    /// Second card is face-up and the pair is waiting to be compared.
    PairPending,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Nothing was pending for this epoch.
    Stale,
    Matched,
    Mismatched,
    Won,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        use ResolveOutcome::*;
        match self {
            Stale => false,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_grids() {
        assert_eq!(
            GameConfig::new((0, 4)),
            Err(GameError::InvalidGridSize { rows: 0, cols: 4 })
        );
        assert_eq!(
            GameConfig::new((3, 0)),
            Err(GameError::InvalidGridSize { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn rejects_odd_card_counts() {
        assert_eq!(
            GameConfig::new((3, 3)),
            Err(GameError::OddCardCount { rows: 3, cols: 3 })
        );
        assert!(GameConfig::new((3, 4)).is_ok());
    }

    #[test]
    fn classic_is_a_full_four_by_four() {
        let config = GameConfig::classic();
        assert_eq!(config.total_cards(), 16);
        assert_eq!(config.pair_count(), 8);
        assert_eq!(config.mismatch_delay, Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn delays_serialize_as_milliseconds() {
        let config = GameConfig::new((2, 4))
            .unwrap()
            .with_mismatch_delay(Duration::from_millis(1200));
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["check_delay"], 100);
        assert_eq!(json["mismatch_delay"], 1200);
        let back: GameConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
