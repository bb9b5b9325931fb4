use crate::*;
pub use random::*;

mod random;

/// Source of freshly dealt decks, asked once per game and once per restart.
pub trait DeckGenerator {
    fn generate(&mut self, pair_count: CellCount) -> Deck;
}

/// Always deals the same layout. Used for replays and for scripted games in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedDeckGenerator {
    deck: Deck,
}

impl FixedDeckGenerator {
    pub fn new(deck: Deck) -> Self {
        Self { deck }
    }
}

impl DeckGenerator for FixedDeckGenerator {
    fn generate(&mut self, pair_count: CellCount) -> Deck {
        if self.deck.pair_count() == pair_count {
            self.deck.clone()
        } else {
            log::warn!(
                "Fixed deck has {} pairs but {} were requested, dealing an ordered deck",
                self.deck.pair_count(),
                pair_count
            );
            Deck::ordered(pair_count)
        }
    }
}
