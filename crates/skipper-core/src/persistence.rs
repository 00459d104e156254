//! Save/Load functionality for player progress
//!
//! Progress and audio settings are written as one versioned envelope. Paths
//! ending in `.json` use serde_json (handy for inspecting saves by hand);
//! anything else uses bincode.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use skipper_logic::feedback::AudioSettings;
use skipper_logic::progress::{GameProgress, ProgressStore};

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Everything written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub progress: GameProgress,
    pub audio: AudioSettings,
}

impl SaveData {
    pub fn new(progress: GameProgress, audio: AudioSettings) -> Self {
        Self {
            version: SAVE_VERSION,
            progress,
            audio,
        }
    }
}

impl Default for SaveData {
    fn default() -> Self {
        Self::new(GameProgress::new(), AudioSettings::default())
    }
}

/// On-disk encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Json,
    Bincode,
}

impl SaveFormat {
    /// `.json` (any case) is JSON, everything else bincode
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SaveFormat::Json,
            _ => SaveFormat::Bincode,
        }
    }
}

/// Write a save to any writer
pub fn save_progress<W: Write>(
    writer: W,
    format: SaveFormat,
    data: &SaveData,
) -> Result<(), StoreError> {
    match format {
        SaveFormat::Json => serde_json::to_writer_pretty(writer, data)?,
        SaveFormat::Bincode => bincode::serialize_into(writer, data)?,
    }
    Ok(())
}

/// Read a save from any reader, rejecting other format versions
pub fn load_progress<R: Read>(reader: R, format: SaveFormat) -> Result<SaveData, StoreError> {
    let data: SaveData = match format {
        SaveFormat::Json => serde_json::from_reader(reader)?,
        SaveFormat::Bincode => bincode::deserialize_from(reader)?,
    };

    if data.version != SAVE_VERSION {
        return Err(StoreError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }

    Ok(data)
}

/// Write a save file, creating or truncating it
pub fn save_file(path: &Path, data: &SaveData) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    save_progress(&mut writer, SaveFormat::from_path(path), data)?;
    writer.flush()?;
    Ok(())
}

/// Read a save file. A missing file is `Ok(None)`
pub fn load_file(path: &Path) -> Result<Option<SaveData>, StoreError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    load_progress(BufReader::new(file), SaveFormat::from_path(path)).map(Some)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Progress store that writes through to disk after every record
///
/// Without a path it behaves as a plain in-memory store.
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    data: SaveData,
    path: Option<PathBuf>,
}

impl FileProgressStore {
    /// In-memory only
    pub fn in_memory() -> Self {
        Self {
            data: SaveData::default(),
            path: None,
        }
    }

    /// Load from `path`, or start fresh if nothing has been saved yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match load_file(&path)? {
            Some(data) => {
                log::info!(
                    "Loaded progress from {} ({} stars)",
                    path.display(),
                    data.progress.total_stars
                );
                data
            }
            None => {
                log::info!("No save at {}, starting fresh", path.display());
                SaveData::default()
            }
        };
        Ok(Self {
            data,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn progress(&self) -> &GameProgress {
        &self.data.progress
    }

    pub fn audio(&self) -> AudioSettings {
        self.data.audio
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    /// Change progress or settings through a closure, then persist
    pub fn update(&mut self, f: impl FnOnce(&mut SaveData)) {
        f(&mut self.data);
        self.persist();
    }

    /// Stamp `last_played` and write to disk. Returns the error for callers
    /// that care; the store itself only logs it.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.data.progress.last_played = unix_now();
        match &self.path {
            Some(path) => save_file(path, &self.data),
            None => Ok(()),
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("Failed to save progress: {}", e);
        }
    }
}

impl ProgressStore for FileProgressStore {
    fn record_level_completion(&mut self, level_id: u32, stars: u8) {
        self.data.progress.complete_boat_level(level_id, stars);
        self.persist();
    }

    fn record_memory_score(&mut self, score: u32) {
        self.data.progress.update_memory_score(score);
        self.persist();
    }

    fn record_drawing(&mut self) {
        self.data.progress.increment_drawing_count();
        self.persist();
    }
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for StoreError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        StoreError::Bincode(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
            StoreError::Bincode(e) => write!(f, "Serialization error: {}", e),
            StoreError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::Bincode(e) => Some(e.as_ref()),
            StoreError::VersionMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played() -> SaveData {
        let mut progress = GameProgress::new();
        progress.complete_boat_level(1, 3);
        progress.complete_boat_level(2, 2);
        progress.update_memory_score(11);
        progress.increment_drawing_count();
        let audio = AudioSettings {
            music_enabled: false,
            sfx_enabled: true,
        };
        SaveData::new(progress, audio)
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("a/save.json")), SaveFormat::Json);
        assert_eq!(SaveFormat::from_path(Path::new("SAVE.JSON")), SaveFormat::Json);
        assert_eq!(SaveFormat::from_path(Path::new("save.bin")), SaveFormat::Bincode);
        assert_eq!(SaveFormat::from_path(Path::new("save")), SaveFormat::Bincode);
    }

    #[test]
    fn test_bincode_roundtrip_in_memory() {
        let data = played();
        let mut buffer = Vec::new();
        save_progress(&mut buffer, SaveFormat::Bincode, &data).expect("Save failed");
        let loaded = load_progress(&buffer[..], SaveFormat::Bincode).expect("Load failed");
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_json_file_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        save_file(&path, &played()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], SAVE_VERSION);
        assert_eq!(value["progress"]["total_stars"], 5);
        assert_eq!(value["audio"]["music_enabled"], false);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("nope.bin")).unwrap().is_none());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut data = played();
        data.version = SAVE_VERSION + 1;
        let mut buffer = Vec::new();
        save_progress(&mut buffer, SaveFormat::Json, &data).unwrap();
        match load_progress(&buffer[..], SaveFormat::Json) {
            Err(StoreError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_a_json_error() {
        let err = load_progress(&b"{ not json"[..], SaveFormat::Json).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_store_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.bin");

        let mut store = FileProgressStore::open(&path).unwrap();
        assert_eq!(store.progress(), &GameProgress::new());
        store.record_level_completion(1, 3);
        store.record_memory_score(8);
        store.record_drawing();
        assert!(store.progress().last_played > 0);

        let reopened = FileProgressStore::open(&path).unwrap();
        assert_eq!(reopened.progress().total_stars, 3);
        assert_eq!(reopened.progress().memory_high_score, 8);
        assert_eq!(reopened.progress().drawing_count, 1);
        assert!(reopened.progress().boat_level(2).unwrap().unlocked);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be opened as a file for writing.
        let mut store = FileProgressStore {
            data: SaveData::default(),
            path: Some(dir.path().to_path_buf()),
        };
        store.record_level_completion(1, 3);
        assert_eq!(store.progress().total_stars, 3);
        assert!(store.save().is_err());
    }
}
