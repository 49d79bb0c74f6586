use std::{fs, io::ErrorKind, path::PathBuf};

use fuse_grid_core::Score;
use fuse_grid_system_scoring::{HighScoreError, HighScoreStore};

/// Volatile store used when no high score file is configured.
#[derive(Debug, Default)]
pub(crate) struct MemoryHighScoreStore {
    best: Score,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> Result<Score, HighScoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: Score) -> Result<(), HighScoreError> {
        self.best = score;
        Ok(())
    }
}

/// Store that persists the best score as JSON in a single file.
#[derive(Debug)]
pub(crate) struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> Result<Score, HighScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // A missing file simply means no best has been recorded yet.
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Score::ZERO),
            Err(error) => {
                return Err(HighScoreError::new(format!(
                    "could not read {}: {error}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str(&contents).map_err(|error| {
            HighScoreError::new(format!(
                "could not parse {}: {error}",
                self.path.display()
            ))
        })
    }

    fn save(&mut self, score: Score) -> Result<(), HighScoreError> {
        let json = serde_json::to_string(&score).map_err(|error| {
            HighScoreError::new(format!("could not serialize high score: {error}"))
        })?;
        fs::write(&self.path, json).map_err(|error| {
            HighScoreError::new(format!(
                "could not write {}: {error}",
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryHighScoreStore::default();
        assert_eq!(store.load().expect("load succeeds"), Score::ZERO);
        store.save(Score::new(128)).expect("save succeeds");
        assert_eq!(store.load().expect("load succeeds"), Score::new(128));
    }

    #[test]
    fn file_store_defaults_to_zero_when_missing() {
        let path = std::env::temp_dir().join("fuse-grid-missing-high-score.json");
        let _ = fs::remove_file(&path);
        let mut store = FileHighScoreStore::new(path);
        assert_eq!(store.load().expect("load succeeds"), Score::ZERO);
    }

    #[test]
    fn file_store_round_trips() {
        let path = std::env::temp_dir().join("fuse-grid-high-score-round-trip.json");
        let mut store = FileHighScoreStore::new(path.clone());
        store.save(Score::new(2048)).expect("save succeeds");
        assert_eq!(store.load().expect("load succeeds"), Score::new(2048));
        let _ = fs::remove_file(&path);
    }
}
