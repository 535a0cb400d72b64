#![cfg(feature = "std")]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::common::StoreError;
use crate::config::GAME_STATE_KEY;
use crate::game::GameState;
use crate::store::GameStore;

/// Encoding of the state blob on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobFormat {
    /// Same record layout the browser kept in local storage.
    #[default]
    Json,
    Bincode,
}

impl BlobFormat {
    fn extension(self) -> &'static str {
        match self {
            BlobFormat::Json => "json",
            BlobFormat::Bincode => "bin",
        }
    }

    fn encode(self, state: &GameState) -> Result<Vec<u8>, StoreError> {
        match self {
            BlobFormat::Json => serde_json::to_vec_pretty(state).map_err(|e| StoreError::Codec(e.to_string())),
            BlobFormat::Bincode => bincode::serialize(state).map_err(|e| StoreError::Codec(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<GameState, StoreError> {
        match self {
            BlobFormat::Json => serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string())),
            BlobFormat::Bincode => bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string())),
        }
    }
}

/// One blob file per session key under a directory.
///
/// Writes land in a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
    format: BlobFormat,
}

impl FileStore {
    /// Store for the default session key.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, GAME_STATE_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
            format: BlobFormat::default(),
        }
    }

    pub fn with_format(mut self, format: BlobFormat) -> Self {
        self.format = format;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Location of the blob file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.key, self.format.extension()))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}.tmp", self.key, self.format.extension()))
    }
}

fn io_err(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {}", path.display(), e))
}

impl GameStore for FileStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        let path = self.path();
        match fs::read(&path) {
            Ok(bytes) => self.format.decode(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        let bytes = self.format.encode(state)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).map_err(|e| io_err(&tmp, e))?;
        let path = self.path();
        fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&path, e)),
        }
    }
}
