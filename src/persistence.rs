use crate::error::PersistenceError;
use crate::types::Task;
use crate::utils::atomic_write_json;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_DATA_FILE: &str = "tasks.json";

/// Replaces the document at `path` with `tasks`, in order.
pub fn save(tasks: &[Task], path: &Path) -> Result<(), PersistenceError> {
    atomic_write_json(path, tasks).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = tasks.len(), "tasks saved");
    Ok(())
}

/// Reads the document at `path`. A missing file is an empty list.
pub fn load(path: &Path) -> Result<Vec<Task>, PersistenceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no task file yet");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|source| PersistenceError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = tasks.len(), "tasks loaded");
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample() -> Vec<Task> {
        let day = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        vec![
            Task::with_created_at("Buy milk", true, day.and_hms_opt(23, 59, 58).unwrap()),
            Task::with_created_at("Walk dog", false, day.and_hms_opt(7, 0, 1).unwrap()),
            Task::with_created_at("Buy milk", false, day.and_hms_opt(7, 0, 1).unwrap()),
        ]
    }

    #[test]
    fn save_writes_a_plain_json_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_DATA_FILE);
        save(&sample()[..2], &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "description": "Buy milk", "completed": true, "created_at": "2023-12-31 23:59:58" },
                { "description": "Walk dog", "completed": false, "created_at": "2023-12-31 07:00:01" }
            ])
        );
    }

    #[test]
    fn load_inverts_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_DATA_FILE);
        let tasks = sample();
        save(&tasks, &path).unwrap();
        assert_eq!(load(&path).unwrap(), tasks);

        save(&[], &path).unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load(&tmp.path().join("nope.json")).unwrap().is_empty());
    }

    #[test]
    fn corrupt_documents_fail_as_malformed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_DATA_FILE);
        let cases = [
            "not json",
            r#"{"description":"a","completed":false,"created_at":"2024-01-01 00:00:00"}"#,
            r#"[{"description":"a","created_at":"2024-01-01 00:00:00"}]"#,
            r#"[{"description":"a","completed":"no","created_at":"2024-01-01 00:00:00"}]"#,
            r#"[{"description":"a","completed":false,"created_at":"2024-01-01T00:00:00Z"}]"#,
        ];
        for case in cases {
            fs::write(&path, case).unwrap();
            let err = load(&path).unwrap_err();
            assert!(matches!(err, PersistenceError::Malformed { .. }), "{case}: {err}");
            assert_eq!(err.path(), &path);
        }
    }

    #[test]
    fn unreadable_path_fails_as_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, PersistenceError::Read { .. }));
    }
}
