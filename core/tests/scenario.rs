use core::time::Duration;
use pairmatch_core::*;
use web_time::Instant;

const CHECK: Duration = Duration::from_millis(100);
const MISMATCH: Duration = Duration::from_millis(1000);

fn abba_session() -> (GameSession<FixedDeckGenerator>, Instant) {
    let deck = Deck::from_symbols(vec![Symbol(0), Symbol(1), Symbol(1), Symbol(0)]).unwrap();
    let config = GameConfig::new((2, 2))
        .unwrap()
        .with_check_delay(CHECK)
        .with_mismatch_delay(MISMATCH);
    let start = Instant::now();
    let generator = FixedDeckGenerator::new(deck.clone());
    let game = MemoryGame::with_deck(config, deck, generator, start).unwrap();
    (GameSession::new(game), start)
}

/// Plays a full turn and lets every delay run out. Returns the instant after the turn.
fn turn(session: &mut GameSession<FixedDeckGenerator>, now: Instant, a: Pos, b: Pos) -> Instant {
    session.click(a, now).unwrap();
    session.click(b, now).unwrap();
    let done = now + CHECK + MISMATCH;
    session.advance(done);
    done
}

#[test]
fn two_by_two_game_is_won_in_three_moves() {
    let (mut session, start) = abba_session();

    let now = turn(&mut session, start, 0, 1);
    assert_eq!(session.game().card_state(0), Some(CardState::Hidden));
    assert_eq!(session.game().card_state(1), Some(CardState::Hidden));
    assert_eq!(session.status(now).moves, 1);

    let now = turn(&mut session, now, 0, 3);
    assert_eq!(session.game().card_state(0), Some(CardState::Matched));
    assert_eq!(session.game().card_state(3), Some(CardState::Matched));
    assert_eq!(session.status(now).moves, 2);

    let now = turn(&mut session, now, 1, 2);
    let status = session.status(now);
    assert_eq!(status.moves, 3);
    assert_eq!(status.matched_count, 4);
    assert_eq!(status.total_pairs, 2);
    assert!(session.game().is_won());
}

#[test]
fn notifications_follow_the_game() {
    let (mut session, start) = abba_session();

    session.click(0, start).unwrap();
    session.click(1, start).unwrap();
    assert_eq!(
        session.drain_events(),
        [
            GameEvent::Revealed { pos: 0, symbol: Symbol(0) },
            GameEvent::Revealed { pos: 1, symbol: Symbol(1) },
        ]
    );

    session.advance(start + CHECK);
    assert_eq!(
        session.drain_events(),
        [GameEvent::Mismatched { first: 0, second: 1 }]
    );

    session.advance(start + CHECK + MISMATCH);
    assert_eq!(
        session.drain_events(),
        [GameEvent::Hidden { pos: 0 }, GameEvent::Hidden { pos: 1 }]
    );

    let now = turn(&mut session, start + CHECK + MISMATCH, 0, 3);
    turn(&mut session, now, 1, 2);
    let events = session.drain_events();
    assert!(events.contains(&GameEvent::Matched { pos: 0 }));
    assert!(events.contains(&GameEvent::Matched { pos: 2 }));
    assert!(matches!(events.last(), Some(GameEvent::Won { moves: 3, .. })));
}

#[test]
fn restart_after_win_starts_a_clean_game() {
    let (mut session, start) = abba_session();

    let now = turn(&mut session, start, 0, 3);
    let now = turn(&mut session, now, 1, 2);
    assert!(session.game().is_won());
    assert!(session.last_score().is_some());

    session.restart(now);
    let status = session.status(now);
    assert_eq!(status.moves, 0);
    assert_eq!(status.matched_count, 0);
    assert_eq!(status.epoch, 1);
    assert_eq!(status.phase, TurnPhase::Open);
    assert!(session.last_score().is_none());
    assert!((0..4).all(|pos| session.game().symbol_at(pos).is_none()));
}

#[test]
fn classic_game_hides_mismatches_at_comparison() {
    let start = Instant::now();
    let game = MemoryGame::with_deck(
        GameConfig::classic(),
        Deck::ordered(8),
        RandomDeckGenerator::new(5),
        start,
    )
    .unwrap();
    let mut session = GameSession::new(game);

    session.click(0, start).unwrap();
    session.click(2, start).unwrap();
    assert_eq!(session.advance(start + CLASSIC_CHECK_DELAY / 2), 0);
    assert_eq!(session.game().symbol_at(2), Some(Symbol(1)));

    assert_eq!(session.advance(start + CLASSIC_CHECK_DELAY), 2);
    assert_eq!(session.game().phase(), TurnPhase::Open);
    assert_eq!(session.game().symbol_at(0), None);
    assert_eq!(session.game().symbol_at(2), None);
    assert_eq!(session.status(start).moves, 1);
}

#[test]
fn seeded_games_deal_the_full_pair_multiset() {
    for seed in 0..25 {
        let config = GameConfig::new((3, 4)).unwrap();
        let mut game = MemoryGame::with_seed(config, seed, Instant::now()).unwrap();
        for _ in 0..4 {
            let mut counts = [0; 6];
            let mut now = Instant::now();
            // reveal every card pair by pair to read the whole layout
            for pos in (0..12).step_by(2) {
                game.click(pos).unwrap();
                game.click(pos + 1).unwrap();
                counts[game.symbol_at(pos).unwrap().index()] += 1;
                counts[game.symbol_at(pos + 1).unwrap().index()] += 1;
                if game.resolve_pending_pair(game.epoch(), now) == ResolveOutcome::Mismatched {
                    game.hide_mismatched(game.epoch());
                }
                now += Duration::from_millis(1);
            }
            assert_eq!(counts, [2; 6]);
            game.restart(now);
        }
    }
}
