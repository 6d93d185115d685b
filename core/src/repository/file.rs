use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::model::task::Task;
use crate::repository::traits::SnapshotStore;
use crate::repository::StoreError;

const TASKS_FILE: &str = "todos.json";
const DARK_MODE_FILE: &str = "dark_mode";

/// File-backed store: one file per key inside the data directory.
#[derive(Clone)]
pub struct FileStore {
    tasks_path: PathBuf,
    dark_mode_path: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".taskpad")
            }
        };
        fs::create_dir_all(&dir)?; // Ensure the directory exists

        Ok(FileStore {
            tasks_path: dir.join(TASKS_FILE),
            dark_mode_path: dir.join(DARK_MODE_FILE),
        })
    }
}

impl SnapshotStore for FileStore {
    fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let file = match File::open(&self.tasks_path) {
            Ok(file) => file,
            // Nothing saved yet: an empty collection, not an error
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.tasks_path.clone(),
                    source: e,
                })
            }
        };
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| StoreError::Corrupt {
            path: self.tasks_path.clone(),
            detail: e.to_string(),
        })
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let file = File::create(&self.tasks_path).map_err(|e| StoreError::WriteFailed {
            path: self.tasks_path.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)
            .map_err(|e| StoreError::SerializeFailed { source: e })?;
        writer.flush().map_err(|e| StoreError::WriteFailed {
            path: self.tasks_path.clone(),
            source: e,
        })
    }

    fn load_dark_mode(&self) -> Result<bool, StoreError> {
        let raw = match fs::read_to_string(&self.dark_mode_path) {
            Ok(raw) => raw,
            // Absent preference defaults to light mode
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.dark_mode_path.clone(),
                    source: e,
                })
            }
        };
        match raw.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(StoreError::Corrupt {
                path: self.dark_mode_path.clone(),
                detail: format!("expected \"true\" or \"false\", got \"{}\"", other),
            }),
        }
    }

    fn save_dark_mode(&self, on: bool) -> Result<(), StoreError> {
        fs::write(&self.dark_mode_path, if on { "true" } else { "false" }).map_err(|e| {
            StoreError::WriteFailed {
                path: self.dark_mode_path.clone(),
                source: e,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;
    use uuid::Uuid;

    fn store_in(dir: &std::path::Path) -> FileStore {
        FileStore::new(Some(dir.to_path_buf())).expect("create store")
    }

    fn sample_task(text: &str, completed: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 5).unwrap(),
        }
    }

    #[test]
    fn load_tasks_on_fresh_store_is_empty() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        assert_eq!(store.load_tasks().unwrap(), Vec::new());
    }

    #[test]
    fn save_load_round_trip_preserves_all_fields() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        let tasks = vec![sample_task("Review spec", false), sample_task("Write spec", true)];
        store.save_tasks(&tasks).unwrap();

        let restored = store.load_tasks().unwrap();
        assert_eq!(restored, tasks);
        // Timestamp survives the string encoding exactly
        assert_eq!(restored[0].created_at, tasks[0].created_at);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        store.save_tasks(&[sample_task("First", false)]).unwrap();
        store.save_tasks(&[sample_task("Second", false)]).unwrap();

        let restored = store.load_tasks().unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].text, "Second");
    }

    #[test]
    fn snapshot_on_disk_is_an_array_with_camel_case_timestamps() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        store.save_tasks(&[sample_task("Inspect disk", false)]).unwrap();

        let raw = fs::read_to_string(temp.path().join("todos.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value.as_array().unwrap()[0];

        assert!(entry["id"].is_string());
        assert_eq!(entry["text"], "Inspect disk");
        assert_eq!(entry["completed"], false);
        assert!(entry["createdAt"].is_string());
    }

    #[test]
    fn load_tasks_on_invalid_json_is_corrupt() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        fs::write(temp.path().join("todos.json"), "{ not json [").unwrap();

        assert!(matches!(
            store.load_tasks(),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn load_tasks_on_undecodable_timestamp_is_corrupt() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        let snapshot = r#"[{"id":"6e9fbd5b-50b0-4e81-9a8a-8ffcbc996d52","text":"Old","completed":false,"createdAt":"yesterday"}]"#;
        fs::write(temp.path().join("todos.json"), snapshot).unwrap();

        assert!(matches!(
            store.load_tasks(),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn dark_mode_defaults_to_light() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        assert!(!store.load_dark_mode().unwrap());
    }

    #[test]
    fn dark_mode_round_trips_as_text() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        store.save_dark_mode(true).unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join("dark_mode")).unwrap(),
            "true"
        );
        assert!(store.load_dark_mode().unwrap());

        store.save_dark_mode(false).unwrap();
        assert!(!store.load_dark_mode().unwrap());
    }

    #[test]
    fn dark_mode_garbage_is_corrupt() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());

        fs::write(temp.path().join("dark_mode"), "maybe").unwrap();

        assert!(matches!(
            store.load_dark_mode(),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
