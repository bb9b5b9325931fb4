use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

/// Where the current turn stands. Clicks are only accepted while `Open`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Fewer than two cards are face-up.
    Open,
    /// Two cards are face-up and waiting to be compared.
    Comparing,
    /// The pair did not match and stays visible until it is hidden again.
    Hiding,
    Won,
}

impl TurnPhase {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Comparing | Self::Hiding)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for TurnPhase {
    fn default() -> Self {
        Self::Open
    }
}

/// Change notification for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Revealed { pos: Pos, symbol: Symbol },
    /// Pair compared unequal, both cards stay up until they are hidden.
    Mismatched { first: Pos, second: Pos },
    Hidden { pos: Pos },
    Matched { pos: Pos },
    Won { moves: u32, elapsed_secs: u64 },
    Restarted { epoch: Epoch },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub moves: u32,
    pub elapsed_secs: u64,
    pub matched_count: CellCount,
    pub total_pairs: CellCount,
    pub total_cards: CellCount,
    pub epoch: Epoch,
    pub phase: TurnPhase,
}

impl StatusSnapshot {
    pub const fn matched_pairs(&self) -> CellCount {
        self.matched_count / 2
    }

    pub const fn is_won(&self) -> bool {
        self.phase.is_finished()
    }
}

/// Rules of a single memory game: revealing, comparing, hiding and winning.
///
/// The game never reads the clock and never schedules anything itself. Whoever drives it
/// passes the current instant in and calls [`MemoryGame::resolve_pending_pair`] and
/// [`MemoryGame::hide_mismatched`] once the configured delays have passed, tagging each call
/// with the epoch that was current when the work was scheduled.
#[derive(Clone, Debug)]
pub struct MemoryGame<G = RandomDeckGenerator> {
    config: GameConfig,
    generator: G,
    deck: Deck,
    board: Vec<CardState>,
    revealed: SmallVec<[Pos; 2]>,
    matched_count: CellCount,
    moves: u32,
    phase: TurnPhase,
    epoch: Epoch,
    started_at: Instant,
    finished_after: Option<Duration>,
    events: Vec<GameEvent>,
}

impl MemoryGame<RandomDeckGenerator> {
    pub fn new(config: GameConfig, now: Instant) -> Result<Self> {
        Self::with_generator(config, RandomDeckGenerator::from_entropy(), now)
    }

    pub fn with_seed(config: GameConfig, seed: u64, now: Instant) -> Result<Self> {
        Self::with_generator(config, RandomDeckGenerator::new(seed), now)
    }
}

impl<G: DeckGenerator> MemoryGame<G> {
    pub fn with_generator(config: GameConfig, mut generator: G, now: Instant) -> Result<Self> {
        config.validate()?;
        let deck = generator.generate(config.pair_count());
        Self::with_deck(config, deck, generator, now)
    }

    /// Starts from a known layout. `generator` is only used for later restarts.
    pub fn with_deck(config: GameConfig, deck: Deck, generator: G, now: Instant) -> Result<Self> {
        config.validate()?;
        let expected = config.total_cards() as usize;
        if deck.len() != expected {
            return Err(GameError::DeckSizeMismatch {
                expected,
                actual: deck.len(),
            });
        }

        Ok(Self {
            config,
            generator,
            board: vec![CardState::Hidden; deck.len()],
            deck,
            revealed: SmallVec::new(),
            matched_count: 0,
            moves: 0,
            phase: TurnPhase::Open,
            epoch: 0,
            started_at: now,
            finished_after: None,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_count(&self) -> CellCount {
        self.matched_count
    }

    /// Positions face-up but not matched yet, in click order.
    pub fn revealed(&self) -> &[Pos] {
        &self.revealed
    }

    pub fn is_won(&self) -> bool {
        usize::from(self.matched_count) == self.board.len()
    }

    pub fn card_state(&self, pos: Pos) -> Option<CardState> {
        self.board.get(pos.to_index()).copied()
    }

    /// Symbol of a face-up card, `None` while it is hidden.
    pub fn symbol_at(&self, pos: Pos) -> Option<Symbol> {
        self.card_state(pos)
            .filter(|state| state.is_face_up())
            .and_then(|_| self.deck.symbol_at(pos))
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.finished_after
            .unwrap_or_else(|| now.saturating_duration_since(self.started_at))
    }

    pub fn status(&self, now: Instant) -> StatusSnapshot {
        StatusSnapshot {
            moves: self.moves,
            elapsed_secs: self.elapsed(now).as_secs(),
            matched_count: self.matched_count,
            total_pairs: self.config.pair_count(),
            total_cards: self.config.total_cards(),
            epoch: self.epoch,
            phase: self.phase,
        }
    }

    /// Takes every notification queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn click(&mut self, pos: Pos) -> Result<ClickOutcome> {
        let state = self.card_state(pos).ok_or(GameError::InvalidPosition)?;

        if self.phase.is_locked() || self.phase.is_finished() || state != CardState::Hidden {
            log::trace!("ignored click at {} ({:?}, {:?})", pos, state, self.phase);
            return Ok(ClickOutcome::Ignored);
        }

        let symbol = self.deck.symbol_at(pos).ok_or(GameError::InvalidPosition)?;
        self.board[pos.to_index()] = CardState::Revealed;
        self.revealed.push(pos);
        self.events.push(GameEvent::Revealed { pos, symbol });
        log::debug!("revealed {} ({:?})", pos, symbol);

        if self.revealed.len() == 2 {
            self.phase = TurnPhase::Comparing;
            Ok(ClickOutcome::PairPending)
        } else {
            Ok(ClickOutcome::Revealed)
        }
    }

    /// Compares the two face-up cards. Counts as one move whatever the result.
    pub fn resolve_pending_pair(&mut self, epoch: Epoch, now: Instant) -> ResolveOutcome {
        if epoch != self.epoch || self.phase != TurnPhase::Comparing {
            log::debug!("skipping stale resolution for epoch {}", epoch);
            return ResolveOutcome::Stale;
        }
        let [first, second] = [self.revealed[0], self.revealed[1]];

        self.moves += 1;

        if self.deck.symbol_at(first) != self.deck.symbol_at(second) {
            log::debug!("mismatch {} / {}", first, second);
            self.phase = TurnPhase::Hiding;
            self.events.push(GameEvent::Mismatched { first, second });
            return ResolveOutcome::Mismatched;
        }

        for pos in [first, second] {
            self.board[pos.to_index()] = CardState::Matched;
            self.events.push(GameEvent::Matched { pos });
        }
        self.matched_count += 2;
        self.revealed.clear();
        log::debug!("matched {} / {}", first, second);

        if self.is_won() {
            self.finish(now);
            ResolveOutcome::Won
        } else {
            self.phase = TurnPhase::Open;
            ResolveOutcome::Matched
        }
    }

    /// Turns a mismatched pair face-down again and unlocks the board.
    pub fn hide_mismatched(&mut self, epoch: Epoch) -> bool {
        if epoch != self.epoch || self.phase != TurnPhase::Hiding {
            log::debug!("skipping stale hide for epoch {}", epoch);
            return false;
        }

        for pos in self.revealed.drain(..) {
            self.board[pos.to_index()] = CardState::Hidden;
            self.events.push(GameEvent::Hidden { pos });
        }
        self.phase = TurnPhase::Open;
        true
    }

    /// Deals a fresh deck and resets every counter. Work scheduled before this is now stale,
    /// and notifications from the previous deal that were not drained yet are dropped.
    pub fn restart(&mut self, now: Instant) {
        let deck = self.generator.generate(self.config.pair_count());
        self.deck = if deck.len() == self.board.len() {
            deck
        } else {
            log::warn!(
                "Dealt deck has {} cards but the grid needs {}, dealing an ordered deck",
                deck.len(),
                self.board.len()
            );
            Deck::ordered(self.config.pair_count())
        };
        self.board.fill(CardState::Hidden);
        self.revealed.clear();
        self.matched_count = 0;
        self.moves = 0;
        self.phase = TurnPhase::Open;
        self.epoch += 1;
        self.started_at = now;
        self.finished_after = None;
        self.events.clear();
        self.events.push(GameEvent::Restarted { epoch: self.epoch });
        log::debug!("restarted, epoch {}", self.epoch);
    }

    fn finish(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.phase = TurnPhase::Won;
        self.finished_after = Some(elapsed);
        self.events.push(GameEvent::Won {
            moves: self.moves,
            elapsed_secs: elapsed.as_secs(),
        });
        log::info!("won in {} moves, {}s", self.moves, elapsed.as_secs());
    }
}
