use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Symbols in board order. Holds exactly two cards of every symbol `0..pair_count`.
///
/// Serialized as a plain symbol array, deserializing goes through [`Deck::from_symbols`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Deck {
    symbols: Vec<Symbol>,
}

impl Deck {
    /// Unshuffled deck, both cards of each pair next to each other.
    pub fn ordered(pair_count: CellCount) -> Self {
        let symbols = (0..pair_count)
            .flat_map(|symbol| [Symbol(symbol), Symbol(symbol)])
            .collect();
        Self { symbols }
    }

    /// Deck with an explicit layout, rejected unless it is made of complete pairs.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.len() % 2 != 0 || symbols.len() / 2 > CellCount::MAX as usize {
            return Err(GameError::InvalidDeck);
        }

        let mut counts = vec![0u8; symbols.len() / 2];
        for symbol in &symbols {
            let Some(count) = counts.get_mut(symbol.index()) else {
                return Err(GameError::InvalidDeck);
            };
            *count += 1;
            if *count > 2 {
                return Err(GameError::InvalidDeck);
            }
        }

        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn pair_count(&self) -> CellCount {
        (self.symbols.len() / 2) as CellCount
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol_at(&self, pos: Pos) -> Option<Symbol> {
        self.symbols.get(pos.to_index()).copied()
    }

    /// Uniform permutation of the same multiset.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.symbols.shuffle(rng);
    }
}

impl TryFrom<Vec<Symbol>> for Deck {
    type Error = GameError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self> {
        Self::from_symbols(symbols)
    }
}

impl From<Deck> for Vec<Symbol> {
    fn from(deck: Deck) -> Self {
        deck.symbols
    }
}
