//! Versioned schema migrations for the state file.
//!
//! Stored state survives application upgrades by carrying a schema version
//! and replaying an ordered list of migration steps on the raw JSON before
//! deserialization. Missing optional fields are then covered by serde
//! defaults; there is no recursive default-merging.

use crate::error::StoreError;
use serde_json::Value;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u64 = 2;

/// Migration steps, indexed by the version they upgrade *from*.
const MIGRATIONS: &[fn(Value) -> Value] = &[drop_null_tasks, unwrap_settings_array];

/// Bring a raw state document up to [`SCHEMA_VERSION`] and return the user
/// object ready for deserialization.
///
/// # Errors
/// Returns [`StoreError::VersionTooNew`] when the file was written by a
/// newer release.
pub fn migrate(raw: Value) -> Result<Value, StoreError> {
    let (version, mut user) = split_envelope(raw);
    if version > SCHEMA_VERSION {
        return Err(StoreError::VersionTooNew {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    let first = usize::try_from(version).unwrap_or(MIGRATIONS.len());
    for (from, step) in MIGRATIONS.iter().enumerate().skip(first) {
        tracing::debug!(from, to = from + 1, "migrating state file");
        user = step(user);
    }
    Ok(user)
}

/// Split `{ "version": n, "user": {...} }` into its parts. Anything without
/// that envelope is the legacy (version 0) layout: a bare user object as the
/// web application kept it in browser storage.
fn split_envelope(raw: Value) -> (u64, Value) {
    if let Value::Object(mut map) = raw {
        let version = map.get("version").and_then(Value::as_u64);
        if let (Some(version), Some(user)) = (version, map.remove("user")) {
            return (version, user);
        }
        return (0, Value::Object(map));
    }
    (0, raw)
}

/// v0 -> v1: legacy task collections could contain null entries (the web
/// app filtered them lazily on write); drop them for good.
fn drop_null_tasks(mut user: Value) -> Value {
    if let Some(tasks) = user.get_mut("tasks").and_then(Value::as_array_mut) {
        tasks.retain(|task| !task.is_null());
    }
    user
}

/// v1 -> v2: `settings` used to be a one-element array; unwrap it to a
/// plain object.
fn unwrap_settings_array(mut user: Value) -> Value {
    if let Some(settings) = user.get_mut("settings")
        && let Some(first) = settings.as_array().and_then(|arr| arr.first()).cloned()
    {
        *settings = first;
    }
    user
}
