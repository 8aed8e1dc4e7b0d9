use chrono::{Local, NaiveDateTime, SubsecRound, Utc};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time truncated to whole seconds, matching what the task file can hold.
pub fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

pub fn get_home_dir() -> PathBuf {
    if let Ok(value) = env::var("HOME") {
        if !value.trim().is_empty() {
            return PathBuf::from(value);
        }
    }
    if let Ok(value) = env::var("USERPROFILE") {
        if !value.trim().is_empty() {
            return PathBuf::from(value);
        }
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expands a leading `~` or `~/` to the home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed == "~" {
        return get_home_dir();
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        return get_home_dir().join(rest);
    }
    PathBuf::from(trimmed)
}

/// Writes `payload` as pretty JSON next to `path` and renames it into place,
/// so readers see either the old document or the new one.
pub fn atomic_write_json<T: Serialize + ?Sized>(path: &Path, payload: &T) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    ensure_dir(dir)?;
    let base = path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("tasks");
    let tmp = dir.join(format!(
        ".{}.{}.{}.tmp",
        base,
        std::process::id(),
        Utc::now().timestamp_millis()
    ));
    let content = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_err) => {
            // Windows refuses to rename over an existing file.
            let _ = fs::remove_file(path);
            if let Err(err2) = fs::rename(&tmp, path) {
                let _ = fs::remove_file(&tmp);
                return Err(err2);
            }
            Ok(())
        }
    }
}
