//! JSON save files.
//!
//! Each save is one self-contained JSON document holding the full chat
//! transcript and the current segment, written to a flat directory and
//! named by its UUID. Listing reads every file's metadata; the corpus
//! is small enough that an index file would be overkill.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{StoryError, StoryResult};
use crate::llm::Message;

/// Format version written into every save.
pub const SAVE_VERSION: &str = "1.0";

/// Length of the story excerpt stored as a preview.
const PREVIEW_CHARS: usize = 500;

/// A complete saved game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    /// Unique save identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// When the save was written.
    pub timestamp: DateTime<Utc>,
    /// Trailing excerpt of the story at save time.
    pub summary: String,
    /// The choices that were on offer at save time.
    pub choices_preview: Vec<String>,
    /// Full chat transcript.
    pub messages: Vec<Message>,
    /// Current narrative text.
    pub current_story: String,
    /// Current choice list.
    pub current_choices: Vec<String>,
    /// How many times the transcript has been compressed.
    pub summary_count: u32,
    /// Save format version.
    pub game_version: String,
}

impl SaveFile {
    /// Assemble a save from live game state.
    pub fn new(
        title: impl Into<String>,
        messages: Vec<Message>,
        current_story: &str,
        current_choices: Vec<String>,
        summary_count: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            timestamp: Utc::now(),
            summary: tail_excerpt(current_story, PREVIEW_CHARS),
            choices_preview: current_choices.clone(),
            messages,
            current_story: current_story.to_string(),
            current_choices,
            summary_count,
            game_version: SAVE_VERSION.to_string(),
        }
    }
}

/// Listing metadata for one save, without the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveMeta {
    /// Unique save identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// When the save was written.
    pub timestamp: DateTime<Utc>,
    /// Trailing excerpt of the story at save time.
    pub summary: String,
}

/// Reads and writes saves in a directory.
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    /// Manage saves under `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StoryResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The managed directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `save` to disk, returning its id.
    pub fn save(&self, save: &SaveFile) -> StoryResult<String> {
        let path = self.path_for(&save.id);
        let json = serde_json::to_string_pretty(save)?;
        fs::write(&path, json)?;
        info!(id = %save.id, path = %path.display(), "game saved");
        Ok(save.id.clone())
    }

    /// Load the save with `id`.
    pub fn load(&self, id: &str) -> StoryResult<SaveFile> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoryError::SaveNotFound(id.to_string()));
        }
        let json = fs::read_to_string(&path)?;
        let save: SaveFile = serde_json::from_str(&json)?;
        Ok(save)
    }

    /// Delete the save with `id`.
    pub fn delete(&self, id: &str) -> StoryResult<()> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoryError::SaveNotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// List all saves, newest first. Unreadable files are logged and
    /// skipped so one corrupt save cannot hide the rest.
    pub fn list(&self) -> StoryResult<Vec<SaveMeta>> {
        let mut saves = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(StoryError::from)
                .and_then(|json| serde_json::from_str::<SaveFile>(&json).map_err(StoryError::from))
            {
                Ok(save) => saves.push(SaveMeta {
                    id: save.id,
                    title: save.title,
                    timestamp: save.timestamp,
                    summary: save.summary,
                }),
                Err(e) => warn!(path = %path.display(), "skipping unreadable save: {e}"),
            }
        }
        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(saves)
    }

    /// Whether any save exists.
    pub fn has_saves(&self) -> StoryResult<bool> {
        Ok(!self.list()?.is_empty())
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

/// The last `max_chars` characters of `text`, on a char boundary.
fn tail_excerpt(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    text.chars().skip(count - max_chars).collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sample_save(title: &str) -> SaveFile {
        SaveFile::new(
            title,
            vec![
                Message::system("gm prompt"),
                Message::assistant("Story: the opening"),
            ],
            "the opening",
            vec!["Go left".into(), "Go right".into(), "Stand still".into()],
            0,
        )
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();

        let save = sample_save("First contact");
        let id = manager.save(&save).unwrap();

        let loaded = manager.load(&id).unwrap();
        assert_eq!(loaded.title, "First contact");
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.current_choices.len(), 3);
        assert_eq!(loaded.game_version, SAVE_VERSION);
    }

    #[test]
    fn load_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let err = manager.load("nope").unwrap_err();
        assert!(matches!(err, StoryError::SaveNotFound(_)));
    }

    #[test]
    fn list_is_newest_first_and_skips_garbage() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();

        let mut older = sample_save("older");
        older.timestamp = Utc::now() - chrono::Duration::hours(2);
        manager.save(&older).unwrap();
        manager.save(&sample_save("newer")).unwrap();

        // A corrupt file in the directory must not break listing.
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let saves = manager.list().unwrap();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].title, "newer");
        assert_eq!(saves[1].title, "older");
        assert!(manager.has_saves().unwrap());
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path()).unwrap();
        let id = manager.save(&sample_save("gone soon")).unwrap();

        manager.delete(&id).unwrap();
        assert!(matches!(
            manager.load(&id),
            Err(StoryError::SaveNotFound(_))
        ));
        assert!(!manager.has_saves().unwrap());
    }

    #[test]
    fn long_story_preview_is_truncated() {
        let long = "x".repeat(2000);
        let save = SaveFile::new("t", Vec::new(), &long, Vec::new(), 0);
        assert_eq!(save.summary.chars().count(), 500);
    }
}
