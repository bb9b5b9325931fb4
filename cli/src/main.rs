use anyhow::{Context, Result};
use clap::Parser;
use core::time::Duration;
use pairmatch_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use web_time::Instant;

mod command;
mod render;

use command::Command;
use render::{Glyphs, Mood};

#[derive(Parser, Debug)]
#[command(version, about = "Memory match in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Fixed 4x4 animal board, compared after one second
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    classic: bool,

    #[arg(long, default_value_t = DEFAULT_SIZE.0)]
    rows: Coord,

    #[arg(long, default_value_t = DEFAULT_SIZE.1)]
    cols: Coord,

    /// How long a revealed pair stays up before it is compared
    #[arg(long)]
    check_delay_ms: Option<u64>,

    /// How long a mismatched pair stays up after the comparison
    #[arg(long)]
    mismatch_delay_ms: Option<u64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where scores.json is kept
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = if self.classic {
            GameConfig::classic()
        } else {
            GameConfig::new((self.rows, self.cols))?
        };
        if let Some(millis) = self.check_delay_ms {
            config = config.with_check_delay(Duration::from_millis(millis));
        }
        if let Some(millis) = self.mismatch_delay_ms {
            config = config.with_mismatch_delay(Duration::from_millis(millis));
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {:?}", args);

    let config = args.game_config().context("Invalid game configuration")?;
    let now = Instant::now();
    let game = match args.seed {
        Some(seed) => MemoryGame::with_seed(config, seed, now)?,
        None => MemoryGame::new(config, now)?,
    };
    let store = ScoreStore::in_data_dir(&args.data_dir);
    let mut session = GameSession::new(game).with_store(store);
    let glyphs = if args.classic {
        Glyphs::animals()
    } else {
        Glyphs::mixed()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::say(&mut out, Mood::Welcome)?;
    render::board(&mut out, session.game(), &glyphs)?;
    render::status(&mut out, &session.status(Instant::now()))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Restart => {
                session.restart(Instant::now());
                session.drain_events();
                render::say(&mut out, Mood::Restarted)?;
            }
            Command::Scores => {
                render::scores(&mut out, session.store(), config.size)?;
                continue;
            }
            Command::Flip(target) => {
                let Some(pos) = target.resolve(&config) else {
                    let (rows, cols) = config.size;
                    writeln!(out, "No card there, the board is {rows}x{cols}")?;
                    continue;
                };
                if !session.click(pos, Instant::now())?.has_update() {
                    continue;
                }
                session.drain_events();
                if session.next_deadline().is_some() {
                    render::board(&mut out, session.game(), &glyphs)?;
                    out.flush()?;
                    wait_for_resolution(&mut session, &mut out)?;
                }
            }
        }

        render::board(&mut out, session.game(), &glyphs)?;
        render::status(&mut out, &session.status(Instant::now()))?;
        if session.game().is_won() {
            if let Some(record) = session.last_score() {
                render::won(&mut out, record)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

/// Input stays blocked while a pair is pending, so just wait out the delays.
fn wait_for_resolution<G: DeckGenerator>(
    session: &mut GameSession<G>,
    out: &mut impl Write,
) -> io::Result<()> {
    while let Some(deadline) = session.next_deadline() {
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        session.advance(Instant::now());
        if let Some(mood) = Mood::from_events(&session.drain_events()) {
            render::say(out, mood)?;
        }
    }
    Ok(())
}
