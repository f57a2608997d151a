//! Persistent best score per game kind.
//!
//! The store holds a flat JSON object mapping game keys to non-negative
//! integers. Unknown keys are preserved; missing keys read as zero.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use clicktech_core::enums::GameKind;

use crate::error::PersistenceError;

pub type ScoreMap = BTreeMap<String, u32>;

/// Backing storage for the score map.
pub trait ScoreStore: Send {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<ScoreMap>, PersistenceError>;
    fn save(&mut self, scores: &ScoreMap) -> Result<(), PersistenceError>;
}

/// Score map stored as a JSON file, replaced atomically on save.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<ScoreMap>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, scores: &ScoreMap) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(scores)?;
        write_atomic(&self.path, json.as_bytes()).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("highscores.json");
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    fs::write(&tmp_path, bytes)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

/// In-memory store shared through an `Arc`, for tests and headless runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Option<ScoreMap>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: ScoreMap) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(scores))),
        }
    }

    /// What the engine last saved.
    pub fn contents(&self) -> Option<ScoreMap> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<ScoreMap>, PersistenceError> {
        Ok(self.contents())
    }

    fn save(&mut self, scores: &ScoreMap) -> Result<(), PersistenceError> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(scores.clone());
        }
        Ok(())
    }
}

/// Best score per game kind, backed by a store.
pub struct HighScores {
    scores: ScoreMap,
    store: Box<dyn ScoreStore>,
}

impl HighScores {
    /// Load from `store`, merging over zeroed defaults. A missing or
    /// unreadable store yields all zeros.
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let mut scores = Self::defaults();
        match store.load() {
            Ok(Some(stored)) => scores.extend(stored),
            Ok(None) => debug!("no stored high scores, starting from zero"),
            Err(error) => warn!(%error, "high scores unreadable, starting from zero"),
        }
        Self { scores, store }
    }

    fn defaults() -> ScoreMap {
        GameKind::ALL
            .iter()
            .map(|kind| (kind.key().to_string(), 0))
            .collect()
    }

    pub fn get(&self, kind: GameKind) -> u32 {
        self.scores.get(kind.key()).copied().unwrap_or(0)
    }

    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    /// Keep `score` if it beats the stored best, persisting immediately.
    /// Returns true when the best changed.
    pub fn record(&mut self, kind: GameKind, score: u32) -> bool {
        if score <= self.get(kind) {
            return false;
        }
        self.scores.insert(kind.key().to_string(), score);
        self.persist();
        true
    }

    /// Zero every known kind and persist.
    pub fn reset(&mut self) {
        for score in self.scores.values_mut() {
            *score = 0;
        }
        self.scores.extend(Self::defaults());
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.scores) {
            warn!(%error, "failed to save high scores");
        }
    }
}
