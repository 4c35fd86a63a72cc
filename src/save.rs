//! Save-file persistence.
//!
//! A game is saved as one JSON object (see [`Snapshot`]). Loading is all
//! or nothing: the engine is only touched once the whole file has parsed
//! and validated.

use derive_more::{Display, Error, From};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};
use ultimate_tictactoe::{GameEngine, GameState, Snapshot, SnapshotError};

/// Why a saved game could not be loaded.
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// No save file exists yet.
    #[display("No saved game at {}", _0.display())]
    #[from(ignore)]
    Missing(#[error(not(source))] PathBuf),

    /// The file exists but could not be read.
    #[display("Failed to read saved game: {}", _0)]
    Io(std::io::Error),

    /// The file is not a well-formed save.
    #[display("Saved game is malformed: {}", _0)]
    Malformed(serde_json::Error),

    /// The save parses but does not describe a playable game.
    #[display("Saved game is invalid: {}", _0)]
    Invalid(SnapshotError),
}

/// Why a game could not be saved.
#[derive(Debug, Display, Error, From)]
pub enum SaveError {
    /// Writing the file failed.
    #[display("Failed to write saved game: {}", _0)]
    Io(std::io::Error),

    /// Encoding the snapshot failed.
    #[display("Failed to encode saved game: {}", _0)]
    Encode(serde_json::Error),
}

/// A save file on disk.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// Returns the save file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a save file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the state, replacing any previous save in one step.
    #[instrument(skip(self, state), fields(path = %self.path.display()))]
    pub fn save(&self, state: &GameState) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(&state.to_snapshot())?;
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        // Written beside the target and renamed over it, so a reader sees
        // either the old save or the new one.
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(&self.path).map_err(|e| e.error)?;
        info!("Game saved");
        Ok(())
    }

    /// Reads and parses the save file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Snapshot, LoadError> {
        if !self.exists() {
            warn!("No saved game");
            return Err(LoadError::Missing(self.path.clone()));
        }
        let text = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Saved game is malformed");
            LoadError::Malformed(e)
        })?;
        debug!("Save file parsed");
        Ok(snapshot)
    }

    /// Loads the save file into the engine.
    ///
    /// On any error the engine keeps its current state.
    #[instrument(skip(self, engine), fields(path = %self.path.display()))]
    pub fn restore_into(&self, engine: &mut GameEngine) -> Result<(), LoadError> {
        let snapshot = self.load()?;
        engine.restore(snapshot).map_err(|e| {
            warn!(error = %e, "Saved game is invalid");
            LoadError::Invalid(e)
        })
    }
}
