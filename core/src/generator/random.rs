use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Deals a uniformly shuffled deck. Seeded generators deal the same sequence of games.
#[derive(Clone, Debug)]
pub struct RandomDeckGenerator {
    rng: SmallRng,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Default for RandomDeckGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(&mut self, pair_count: CellCount) -> Deck {
        let mut deck = Deck::ordered(pair_count);
        deck.shuffle(&mut self.rng);
        log::trace!("dealt {:?}", deck.symbols());
        deck
    }
}
