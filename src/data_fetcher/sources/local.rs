//! Local snapshot capabilities and the best-effort wrapper repositories use.

use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use crate::constants::files;
use crate::error::AppError;

/// Collections a local source stores as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Games,
    Players,
    Teams,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Games => "games",
            EntityKind::Players => "players",
            EntityKind::Teams => "teams",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            EntityKind::Games => files::GAMES,
            EntityKind::Players => files::PLAYERS,
            EntityKind::Teams => files::TEAMS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known-good payloads. `Ok(None)` means nothing has been stored yet.
pub trait LocalDataSource: Send + Sync {
    fn load_games(&self) -> Result<Option<Bytes>, AppError>;

    fn load_players(&self) -> Result<Option<Bytes>, AppError>;

    fn load_teams(&self) -> Result<Option<Bytes>, AppError>;

    fn load_box_score(&self, game_id: &str) -> Result<Option<Bytes>, AppError>;
}

pub trait WritableLocalDataSource: LocalDataSource {
    fn save_games(&self, bytes: &[u8]) -> Result<(), AppError>;

    fn save_players(&self, bytes: &[u8]) -> Result<(), AppError>;

    fn save_teams(&self, bytes: &[u8]) -> Result<(), AppError>;

    fn save_box_score(&self, bytes: &[u8], game_id: &str) -> Result<(), AppError>;
}

/// Local source kept entirely in memory. Useful for tests and for running
/// without a snapshot directory.
#[derive(Debug, Default)]
pub struct InMemoryLocalDataSource {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryLocalDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, key: &str) -> Option<Bytes> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn write(&self, key: String, bytes: &[u8]) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, Bytes::copy_from_slice(bytes));
    }

    fn box_score_key(game_id: &str) -> String {
        format!("boxscore_{game_id}")
    }
}

impl LocalDataSource for InMemoryLocalDataSource {
    fn load_games(&self) -> Result<Option<Bytes>, AppError> {
        Ok(self.read(EntityKind::Games.as_str()))
    }

    fn load_players(&self) -> Result<Option<Bytes>, AppError> {
        Ok(self.read(EntityKind::Players.as_str()))
    }

    fn load_teams(&self) -> Result<Option<Bytes>, AppError> {
        Ok(self.read(EntityKind::Teams.as_str()))
    }

    fn load_box_score(&self, game_id: &str) -> Result<Option<Bytes>, AppError> {
        Ok(self.read(&Self::box_score_key(game_id)))
    }
}

impl WritableLocalDataSource for InMemoryLocalDataSource {
    fn save_games(&self, bytes: &[u8]) -> Result<(), AppError> {
        self.write(EntityKind::Games.as_str().to_string(), bytes);
        Ok(())
    }

    fn save_players(&self, bytes: &[u8]) -> Result<(), AppError> {
        self.write(EntityKind::Players.as_str().to_string(), bytes);
        Ok(())
    }

    fn save_teams(&self, bytes: &[u8]) -> Result<(), AppError> {
        self.write(EntityKind::Teams.as_str().to_string(), bytes);
        Ok(())
    }

    fn save_box_score(&self, bytes: &[u8], game_id: &str) -> Result<(), AppError> {
        self.write(Self::box_score_key(game_id), bytes);
        Ok(())
    }
}

/// A local reader plus an optional writer, as repositories consume them.
///
/// Reads and writes here never fail: a read error is logged and treated as
/// "nothing stored", and a write error is logged and dropped.
#[derive(Clone)]
pub struct LocalStore {
    reader: Arc<dyn LocalDataSource>,
    writer: Option<Arc<dyn WritableLocalDataSource>>,
}

impl LocalStore {
    pub fn read_only(reader: Arc<dyn LocalDataSource>) -> Self {
        Self {
            reader,
            writer: None,
        }
    }

    pub fn writable<S>(source: Arc<S>) -> Self
    where
        S: WritableLocalDataSource + 'static,
    {
        Self {
            reader: source.clone(),
            writer: Some(source),
        }
    }

    /// In-memory store that starts empty
    pub fn in_memory() -> Self {
        Self::writable(Arc::new(InMemoryLocalDataSource::new()))
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    pub fn load(&self, kind: EntityKind) -> Option<Bytes> {
        let result = match kind {
            EntityKind::Games => self.reader.load_games(),
            EntityKind::Players => self.reader.load_players(),
            EntityKind::Teams => self.reader.load_teams(),
        };

        match result {
            Ok(Some(bytes)) => {
                debug!("Loaded local {} snapshot: {} bytes", kind, bytes.len());
                Some(bytes)
            }
            Ok(None) => {
                debug!("No local {} snapshot", kind);
                None
            }
            Err(e) => {
                warn!("Failed to read local {} snapshot, ignoring it: {}", kind, e);
                None
            }
        }
    }

    pub fn load_box_score(&self, game_id: &str) -> Option<Bytes> {
        match self.reader.load_box_score(game_id) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read local box score for game {}: {}", game_id, e);
                None
            }
        }
    }

    /// Saves `bytes` as the snapshot for `kind`. Best-effort.
    pub fn persist(&self, kind: EntityKind, bytes: &[u8]) {
        let Some(writer) = &self.writer else {
            return;
        };

        let result = match kind {
            EntityKind::Games => writer.save_games(bytes),
            EntityKind::Players => writer.save_players(bytes),
            EntityKind::Teams => writer.save_teams(bytes),
        };

        match result {
            Ok(()) => debug!("Persisted {} snapshot: {} bytes", kind, bytes.len()),
            Err(e) => warn!("Failed to persist {} snapshot: {}", kind, e),
        }
    }

    pub fn persist_box_score(&self, bytes: &[u8], game_id: &str) {
        let Some(writer) = &self.writer else {
            return;
        };

        if let Err(e) = writer.save_box_score(bytes, game_id) {
            warn!("Failed to persist box score for game {}: {}", game_id, e);
        }
    }
}

impl fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStore")
            .field("writable", &self.is_writable())
            .finish()
    }
}
