use std::collections::VecDeque;
use web_time::Instant;

use crate::*;

/// Work a click leaves behind for later.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
    Resolve,
    Hide,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub due: Instant,
    pub epoch: Epoch,
    pub task: Deferred,
}

/// Drives a [`MemoryGame`] from a single-threaded event loop.
///
/// Delayed comparisons and hides are queued as [`Scheduled`] tasks tagged with the epoch they
/// were created in, and only run when the loop calls [`GameSession::advance`]. Wins are
/// appended to the attached [`ScoreStore`], if any.
#[derive(Debug)]
pub struct GameSession<G = RandomDeckGenerator> {
    game: MemoryGame<G>,
    queue: VecDeque<Scheduled>,
    store: Option<ScoreStore>,
    last_score: Option<ScoreRecord>,
}

impl<G: DeckGenerator> GameSession<G> {
    pub fn new(game: MemoryGame<G>) -> Self {
        Self {
            game,
            queue: VecDeque::new(),
            store: None,
            last_score: None,
        }
    }

    pub fn with_store(mut self, store: ScoreStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn game(&self) -> &MemoryGame<G> {
        &self.game
    }

    pub fn store(&self) -> Option<&ScoreStore> {
        self.store.as_ref()
    }

    /// Record of the most recent win in this session.
    pub fn last_score(&self) -> Option<&ScoreRecord> {
        self.last_score.as_ref()
    }

    pub fn status(&self, now: Instant) -> StatusSnapshot {
        self.game.status(now)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    /// When the loop has to call [`GameSession::advance`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.front().map(|scheduled| scheduled.due)
    }

    pub fn click(&mut self, pos: Pos, now: Instant) -> Result<ClickOutcome> {
        let outcome = self.game.click(pos)?;
        if outcome == ClickOutcome::PairPending {
            let due = now + self.game.config().check_delay;
            self.schedule(due, Deferred::Resolve);
        }
        Ok(outcome)
    }

    /// Runs every task due at `now`, including the ones those tasks schedule. Returns how many ran.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut ran = 0;

        while let Some(scheduled) = self.pop_due(now) {
            if scheduled.epoch != self.game.epoch() {
                log::debug!("dropping {:?} from epoch {}", scheduled.task, scheduled.epoch);
                continue;
            }

            match scheduled.task {
                Deferred::Resolve => {
                    let outcome = self
                        .game
                        .resolve_pending_pair(scheduled.epoch, scheduled.due);
                    match outcome {
                        ResolveOutcome::Mismatched => {
                            let due = scheduled.due + self.game.config().mismatch_delay;
                            self.schedule(due, Deferred::Hide);
                        }
                        ResolveOutcome::Won => self.record_win(scheduled.due),
                        ResolveOutcome::Matched | ResolveOutcome::Stale => {}
                    }
                }
                Deferred::Hide => {
                    self.game.hide_mismatched(scheduled.epoch);
                }
            }
            ran += 1;
        }

        ran
    }

    /// Cancels everything still queued and deals a new game.
    pub fn restart(&mut self, now: Instant) {
        if !self.queue.is_empty() {
            log::debug!("cancelling {} pending tasks", self.queue.len());
        }
        self.queue.clear();
        self.last_score = None;
        self.game.restart(now);
    }

    fn schedule(&mut self, due: Instant, task: Deferred) {
        let scheduled = Scheduled {
            due,
            epoch: self.game.epoch(),
            task,
        };
        let index = self.queue.partition_point(|queued| queued.due <= due);
        self.queue.insert(index, scheduled);
    }

    fn pop_due(&mut self, now: Instant) -> Option<Scheduled> {
        if self.queue.front()?.due <= now {
            self.queue.pop_front()
        } else {
            None
        }
    }

    fn record_win(&mut self, now: Instant) {
        let status = self.game.status(now);
        let record = ScoreRecord::new(status.moves, status.elapsed_secs, self.game.config().size);
        self.last_score = Some(record);

        if let Some(store) = &self.store {
            if let Err(err) = store.append(&record) {
                log::error!("Could not save score to {}: {}", store.path().display(), err);
            }
        }
    }
}
