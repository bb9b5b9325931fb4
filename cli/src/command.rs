use core::str::FromStr;
use pairmatch_core::{Coord, Coord2, GameConfig, Pos};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipTarget {
    Index(Pos),
    Cell(Coord2),
}

impl FlipTarget {
    pub fn resolve(self, config: &GameConfig) -> Option<Pos> {
        match self {
            Self::Index(pos) => (pos < config.total_cards()).then_some(pos),
            Self::Cell(coords) => config.pos_of(coords),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Flip(FlipTarget),
    Restart,
    Scores,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["r" | "restart" | "reset"] => Ok(Self::Restart),
            ["s" | "scores"] => Ok(Self::Scores),
            ["q" | "quit" | "exit"] => Ok(Self::Quit),
            [index] => index
                .parse::<Pos>()
                .map(|pos| Self::Flip(FlipTarget::Index(pos)))
                .map_err(|_| format!("Unknown command {index:?}")),
            [row, col] => {
                let row = row.parse::<Coord>();
                let col = col.parse::<Coord>();
                match (row, col) {
                    (Ok(row), Ok(col)) => Ok(Self::Flip(FlipTarget::Cell((row, col)))),
                    _ => Err("Expected <row> <col>".into()),
                }
            }
            _ => Err("Commands: <index> | <row> <col> | restart | scores | quit".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(" restart ".parse::<Command>(), Ok(Command::Restart));
        assert_eq!("scores".parse::<Command>(), Ok(Command::Scores));
        assert_eq!("7".parse::<Command>(), Ok(Command::Flip(FlipTarget::Index(7))));
        assert_eq!("1 2".parse::<Command>(), Ok(Command::Flip(FlipTarget::Cell((1, 2)))));
        assert!("flip".parse::<Command>().is_err());
        assert!("1 x".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn targets_resolve_inside_the_grid_only() {
        let config = GameConfig::new((2, 4)).unwrap();

        assert_eq!(FlipTarget::Index(7).resolve(&config), Some(7));
        assert_eq!(FlipTarget::Index(8).resolve(&config), None);
        assert_eq!(FlipTarget::Cell((1, 3)).resolve(&config), Some(7));
        assert_eq!(FlipTarget::Cell((2, 0)).resolve(&config), None);
    }
}
