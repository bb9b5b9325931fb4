use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::*;

pub const SCORES_FILE: &str = "scores.json";

/// One completed game. Field names are the on-disk keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Unix seconds at the time of the win.
    pub timestamp: i64,
    pub moves: u32,
    pub time_s: u64,
    pub rows: Coord,
    pub cols: Coord,
}

impl ScoreRecord {
    /// Record stamped with the current wall-clock time.
    pub fn new(moves: u32, time_s: u64, (rows, cols): Coord2) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            moves,
            time_s,
            rows,
            cols,
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }
}

/// Append-only JSON log of completed games.
///
/// Every append rewrites the whole file, so a single writer is assumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/scores.json`, the directory is created on the first append.
    pub fn in_data_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SCORES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored record, or none at all when the file is missing or cannot be read.
    pub fn load(&self) -> Vec<ScoreRecord> {
        self.try_load().unwrap_or_else(|err| {
            log::warn!("Ignoring unreadable score file {}: {}", self.path.display(), err);
            Vec::new()
        })
    }

    /// Like [`ScoreStore::load`] but reports unreadable or malformed files.
    pub fn try_load(&self) -> core::result::Result<Vec<ScoreRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        // a literal `null` counts as an empty log
        let records: Option<Vec<ScoreRecord>> = serde_json::from_str(&text)?;
        Ok(records.unwrap_or_default())
    }

    pub fn append(&self, record: &ScoreRecord) -> core::result::Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut records = self.load();
        records.push(*record);
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;

        log::info!(
            "Saved score ({} records) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn records_for(&self, size: Coord2) -> Vec<ScoreRecord> {
        self.load()
            .into_iter()
            .filter(|record| record.size() == size)
            .collect()
    }

    /// Fewest moves on this grid, ties go to the faster game.
    pub fn best_for(&self, size: Coord2) -> Option<ScoreRecord> {
        self.records_for(size)
            .into_iter()
            .min_by_key(|record| (record.moves, record.time_s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(moves: u32, time_s: u64) -> ScoreRecord {
        ScoreRecord {
            timestamp: 1_700_000_000,
            moves,
            time_s,
            rows: 2,
            cols: 4,
        }
    }

    #[test]
    fn record_uses_the_persisted_key_names() {
        let json = serde_json::to_value(record(7, 42)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": 1_700_000_000,
                "moves": 7,
                "time_s": 42,
                "rows": 2,
                "cols": 4,
            })
        );
    }

    #[test]
    fn new_record_is_stamped_with_current_time() {
        let before = chrono::Utc::now().timestamp();
        let record = ScoreRecord::new(3, 9, (4, 4));

        assert!(record.timestamp >= before);
        assert_eq!(record.size(), (4, 4));
    }

    #[test]
    fn data_dir_store_uses_scores_file() {
        let store = ScoreStore::in_data_dir("data");

        assert_eq!(store.path(), Path::new("data").join("scores.json"));
    }
}
