use pairmatch_core::*;
use std::io::{self, Write};

const ANIMALS: &[&str] = &["🐷", "🐶", "🐔", "🐦", "🐟", "🐜", "🐻", "🐭"];
const MIXED: &[&str] = &[
    "🐶", "🐱", "🐰", "🦊", "🐼", "🐵", "🐸", "🐷", "🍎", "🍊", "🍓", "🌟",
];
const FACE_DOWN: &str = "❓";

/// How symbols are drawn. Symbols past the end of the set fall back to letters.
pub struct Glyphs {
    set: &'static [&'static str],
}

impl Glyphs {
    pub const fn animals() -> Self {
        Self { set: ANIMALS }
    }

    pub const fn mixed() -> Self {
        Self { set: MIXED }
    }

    pub fn glyph(&self, symbol: Symbol) -> String {
        match self.set.get(symbol.index()) {
            Some(glyph) => (*glyph).to_owned(),
            None => fallback_glyph(symbol.index() - self.set.len()),
        }
    }
}

/// `A`..`Z`, then `AA`, `AB`, ... padded to the width of an emoji.
fn fallback_glyph(index: usize) -> String {
    let mut label = String::new();
    let mut n = index;
    loop {
        label.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("{label:<2}")
}

/// What the companion says.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mood {
    Welcome,
    Matched,
    Mismatched,
    Restarted,
    Won,
}

impl Mood {
    /// Reaction to the latest notification that deserves one.
    pub fn from_events(events: &[GameEvent]) -> Option<Self> {
        events.iter().rev().find_map(|event| match event {
            GameEvent::Won { .. } => Some(Self::Won),
            GameEvent::Matched { .. } => Some(Self::Matched),
            GameEvent::Mismatched { .. } => Some(Self::Mismatched),
            GameEvent::Restarted { .. } => Some(Self::Restarted),
            GameEvent::Revealed { .. } | GameEvent::Hidden { .. } => None,
        })
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome! Pick a card to start.",
            Self::Matched => "Great, that's a pair! 🎉",
            Self::Mismatched => "Not a pair, try again.",
            Self::Restarted => "Board reset, ready for a new game.",
            Self::Won => "Fantastic, Vaila is proud of you! 🥳",
        }
    }
}

pub fn say(out: &mut impl Write, mood: Mood) -> io::Result<()> {
    writeln!(out, "🦊 Vaila: {}", mood.message())
}

pub fn board<G: DeckGenerator>(
    out: &mut impl Write,
    game: &MemoryGame<G>,
    glyphs: &Glyphs,
) -> io::Result<()> {
    let config = game.config();
    write!(out, "   ")?;
    for col in 0..config.cols() {
        write!(out, " {col:<2}")?;
    }
    writeln!(out)?;

    for row in 0..config.rows() {
        write!(out, "{row:>2} ")?;
        for col in 0..config.cols() {
            let cell = config
                .pos_of((row, col))
                .and_then(|pos| game.symbol_at(pos))
                .map_or_else(|| FACE_DOWN.to_owned(), |symbol| glyphs.glyph(symbol));
            write!(out, " {cell}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn status(out: &mut impl Write, status: &StatusSnapshot) -> io::Result<()> {
    writeln!(
        out,
        "Moves: {}  Time: {}s  Pairs: {}/{}",
        status.moves,
        status.elapsed_secs,
        status.matched_pairs(),
        status.total_pairs
    )
}

pub fn won(out: &mut impl Write, record: &ScoreRecord) -> io::Result<()> {
    writeln!(
        out,
        "Finished in {} moves and {} seconds. Type `restart` to play again.",
        record.moves, record.time_s
    )
}

pub fn scores(out: &mut impl Write, store: Option<&ScoreStore>, size: Coord2) -> io::Result<()> {
    let Some(store) = store else {
        return writeln!(out, "Scores are not being saved.");
    };
    let records = store.records_for(size);
    if records.is_empty() {
        return writeln!(out, "No finished {}x{} games yet.", size.0, size.1);
    }

    writeln!(out, "{} finished {}x{} games", records.len(), size.0, size.1)?;
    if let Some(best) = store.best_for(size) {
        writeln!(out, "Best: {} moves in {}s", best.moves, best.time_s)?;
    }
    for record in records.iter().rev().take(5) {
        writeln!(out, "  {} moves, {}s", record.moves, record.time_s)?;
    }
    Ok(())
}
