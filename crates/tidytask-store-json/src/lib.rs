//! JSON-file storage for the tidytask user state.
//!
//! The whole application state (profile, settings, categories, tasks) is a
//! single JSON document on disk, wrapped in a versioned envelope. Loads run
//! the schema migrations; saves are atomic (write to a temp file, rename
//! over the destination).

/// Error types.
pub mod error;
/// Versioned schema migrations.
pub mod migrate;

pub use error::StoreError;
pub use migrate::SCHEMA_VERSION;

use serde_json::{Value, json};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tidytask_core::User;
use tracing::debug;

/// Storage backed by a single JSON state file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the given state file path. No I/O happens here;
    /// a missing file simply loads as the default user.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the user state, applying schema migrations as needed.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if it was written by a newer release.
    pub fn load(&self) -> Result<User, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "state file absent, using defaults");
                return Ok(User::default());
            }
            Err(err) => return Err(err.into()),
        };

        let raw: Value = serde_json::from_str(&contents)?;
        let user = migrate::migrate(raw)?;
        Ok(serde_json::from_value(user)?)
    }

    /// Persist the user state atomically.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written or renamed into place.
    pub fn save(&self, user: &User) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let envelope = json!({ "version": SCHEMA_VERSION, "user": user });
        let body = serde_json::to_string_pretty(&envelope)?;

        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        debug!(path = %self.path.display(), "state file saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tidytask_core::{HexColor, Task};
    use time::OffsetDateTime;

    fn store_in(dir: &Path) -> JsonStore {
        JsonStore::open(dir.join("user.json"))
    }

    #[test]
    fn missing_file_loads_the_default_user() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let store = store_in(dir.path());
        let user = store.load().unwrap_or_else(|err| panic!("load: {err}"));
        assert!(user.tasks.is_empty());
        assert_eq!(user.categories.len(), 5);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let store = store_in(dir.path());

        let mut user = User::default();
        let color: HexColor = "#7ACCFA".parse().unwrap_or_else(|err| panic!("color: {err}"));
        user.tasks.push(Task::new("persisted", color, OffsetDateTime::now_utc()));
        store.save(&user).unwrap_or_else(|err| panic!("save: {err}"));

        let loaded = store.load().unwrap_or_else(|err| panic!("load: {err}"));
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].name, "persisted");
    }

    #[test]
    fn legacy_browser_export_is_migrated() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("user.json");
        // A bare user object with a settings array, as the web app stored it.
        fs::write(
            &path,
            "{\"tasks\":[null],\"settings\":[{\"doneToBottom\":true,\"enableCategories\":false}]}",
        )
        .unwrap_or_else(|err| panic!("write legacy file: {err}"));

        let user = JsonStore::open(&path)
            .load()
            .unwrap_or_else(|err| panic!("load legacy: {err}"));
        assert!(user.tasks.is_empty());
        assert!(user.settings.done_to_bottom);
        assert!(!user.settings.enable_categories);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("user.json");
        fs::write(&path, "not json").unwrap_or_else(|err| panic!("write: {err}"));

        let result = JsonStore::open(&path).load();
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn file_from_a_newer_release_is_refused() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("user.json");
        fs::write(&path, format!("{{\"version\":{},\"user\":{{}}}}", SCHEMA_VERSION + 1))
            .unwrap_or_else(|err| panic!("write: {err}"));

        let result = JsonStore::open(&path).load();
        assert!(matches!(result, Err(StoreError::VersionTooNew { .. })));
    }
}
