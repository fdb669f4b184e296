use bytes::Bytes;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::local::{EntityKind, LocalDataSource, WritableLocalDataSource};
use crate::constants::files;
use crate::error::AppError;

/// Local snapshots stored as one JSON file per collection under a directory,
/// with box scores in `boxscores/<game id>.json`.
///
/// Files are replaced by writing a sibling temp file and renaming it over the
/// old one, so a reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotLocalDataSource {
    root: PathBuf,
}

impl SnapshotLocalDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    fn box_score_path(&self, game_id: &str) -> PathBuf {
        // Ids come from remote payloads; keep them from escaping the directory
        let file_name: String = game_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root
            .join(files::BOX_SCORE_DIR)
            .join(format!("{file_name}.json"))
    }

    fn read(path: &Path) -> Result<Option<Bytes>, AppError> {
        match fs::read(path) {
            Ok(contents) => Ok(Some(Bytes::from(contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
        let to_persistence_error =
            |e: std::io::Error| AppError::persistence(path.display().to_string(), e.to_string());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_persistence_error)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(to_persistence_error)?;
        fs::rename(&tmp_path, path).map_err(to_persistence_error)?;

        debug!("Wrote snapshot {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

impl LocalDataSource for SnapshotLocalDataSource {
    fn load_games(&self) -> Result<Option<Bytes>, AppError> {
        Self::read(&self.collection_path(EntityKind::Games))
    }

    fn load_players(&self) -> Result<Option<Bytes>, AppError> {
        Self::read(&self.collection_path(EntityKind::Players))
    }

    fn load_teams(&self) -> Result<Option<Bytes>, AppError> {
        Self::read(&self.collection_path(EntityKind::Teams))
    }

    fn load_box_score(&self, game_id: &str) -> Result<Option<Bytes>, AppError> {
        Self::read(&self.box_score_path(game_id))
    }
}

impl WritableLocalDataSource for SnapshotLocalDataSource {
    fn save_games(&self, bytes: &[u8]) -> Result<(), AppError> {
        Self::write(&self.collection_path(EntityKind::Games), bytes)
    }

    fn save_players(&self, bytes: &[u8]) -> Result<(), AppError> {
        Self::write(&self.collection_path(EntityKind::Players), bytes)
    }

    fn save_teams(&self, bytes: &[u8]) -> Result<(), AppError> {
        Self::write(&self.collection_path(EntityKind::Teams), bytes)
    }

    fn save_box_score(&self, bytes: &[u8], game_id: &str) -> Result<(), AppError> {
        Self::write(&self.box_score_path(game_id), bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_read_as_absent() {
        let dir = tempdir().unwrap();
        let source = SnapshotLocalDataSource::new(dir.path());
        assert!(source.load_games().unwrap().is_none());
        assert!(source.load_box_score("g1").unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directories_and_overwrites() {
        let dir = tempdir().unwrap();
        let source = SnapshotLocalDataSource::new(dir.path().join("nested"));

        source.save_teams(b"[1]").unwrap();
        source.save_teams(b"[1,2]").unwrap();
        assert_eq!(source.load_teams().unwrap().as_deref(), Some(&b"[1,2]"[..]));
        assert!(dir.path().join("nested").join("teams.json").exists());
        assert!(!dir.path().join("nested").join("teams.json.tmp").exists());
    }

    #[test]
    fn test_box_score_ids_stay_inside_the_directory() {
        let dir = tempdir().unwrap();
        let source = SnapshotLocalDataSource::new(dir.path());

        source.save_box_score(b"{}", "../../etc/passwd").unwrap();
        let expected = dir.path().join("boxscores").join("______etc_passwd.json");
        assert!(expected.exists());
        assert!(source.load_box_score("../../etc/passwd").unwrap().is_some());
    }

    #[test]
    fn test_unwritable_root_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let source = SnapshotLocalDataSource::new(blocker.join("snapshots"));
        let error = source.save_games(b"[]").unwrap_err();
        assert!(matches!(error, AppError::Persistence { .. }));
    }
}
