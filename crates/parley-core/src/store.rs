//! On-disk history: `{ "schema": 1, "turns": [...] }` as pretty JSON.

use crate::errors::{ChatError, Result};
use parley_abi::Turn;
use serde::{Deserialize, Serialize};
use serde_json as json;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTORY_SCHEMA: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile<'a> {
    schema: u32,
    turns: Cow<'a, [Turn]>,
}

/// Serialize `turns` and atomically replace `path` with them.
///
/// Writes `<path>.tmp` next to the target and renames it into place, so a
/// failed write never clobbers an older save.
pub fn save_turns(path: &Path, turns: &[Turn]) -> Result<()> {
    let bytes = json::to_vec_pretty(&HistoryFile {
        schema: HISTORY_SCHEMA,
        turns: Cow::Borrowed(turns),
    })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = tmp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Read a history file written by [`save_turns`].
pub fn load_turns(path: &Path) -> Result<Vec<Turn>> {
    let buf = fs::read(path)?;
    let file: HistoryFile<'static> = json::from_slice(&buf)?;
    if file.schema != HISTORY_SCHEMA {
        return Err(ChatError::Schema(file.schema));
    }
    Ok(file.turns.into_owned())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_keeps_order_and_roles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.history");
        let turns = vec![
            Turn::human("我叫老三，你是？."),
            Turn::ai("I am an AI."),
            Turn::human("second."),
            Turn::ai(""),
        ];

        save_turns(&path, &turns).unwrap();
        assert_eq!(load_turns(&path).unwrap(), turns);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/chat.history");

        save_turns(&path, &[Turn::human("x.")]).unwrap();
        assert_eq!(load_turns(&path).unwrap().len(), 1);
    }

    #[test]
    fn rejects_unknown_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.history");
        fs::write(&path, r#"{"schema":7,"turns":[]}"#).unwrap();

        assert!(matches!(load_turns(&path), Err(ChatError::Schema(7))));
    }

    #[test]
    fn garbage_is_a_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.history");
        fs::write(&path, b"\x00\x01not json").unwrap();

        let err = load_turns(&path).unwrap_err();
        assert!(matches!(err, ChatError::Serde(_)));
        assert!(err.is_persistence());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_turns(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ChatError::Io(_)));
    }
}
