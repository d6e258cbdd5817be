//! Shareable task links.
//!
//! A task is shared by embedding it, stripped of its identity, as a
//! percent-encoded JSON query parameter on the application's `/share`
//! route together with the sharer's display name:
//!
//! ```text
//! <origin>/share?task=<payload>&userName=<name>
//! ```
//!
//! The receiving side parses and validates the payload without touching
//! any state; merging it into the recipient's collections happens only on
//! explicit acceptance, at the service layer.

use crate::color::HexColor;
use crate::id::{CategoryId, TaskId};
use crate::limits::USER_NAME_MAX_LENGTH;
use crate::task::{Category, Task};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// Characters escaped in query parameter values.
///
/// Matches `encodeURIComponent`, which leaves `- _ . ! ~ * ' ( )`
/// unescaped, so links produced here are byte-identical to the web app's.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Failures while building or reading a share link.
#[derive(Debug, Error)]
pub enum ShareError {
    /// A required query parameter is absent.
    #[error("missing share parameter: {0}")]
    MissingParam(&'static str),
    /// The task payload could not be decoded or parsed.
    #[error("failed to decode shared task data: {0}")]
    Payload(String),
    /// The shared task's color is not a 6-digit hex string.
    #[error("invalid task color format: {0}")]
    TaskColor(String),
    /// A category carried by the shared task has a malformed color.
    #[error("invalid category color format: {0}")]
    CategoryColor(String),
    /// The sharer name exceeds the allowed length.
    #[error("sharer name is too long: {len} characters (limit {USER_NAME_MAX_LENGTH})")]
    UserNameTooLong {
        /// Length of the rejected name, in characters.
        len: usize,
    },
    /// The payload could not be serialized when building a link.
    #[error("failed to encode share payload: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Build a shareable link for one task.
///
/// The task's identity and any prior shared-by attribution are stripped; a
/// fresh identifier is minted on import, so double imports can never
/// collide. When the sharer has categories disabled the category data is
/// omitted entirely.
///
/// # Errors
/// Returns [`ShareError::Encode`] if the payload cannot be serialized.
pub fn share_url(
    task: &Task,
    sharer_name: &str,
    origin: &str,
    categories_enabled: bool,
) -> Result<String, ShareError> {
    let payload = OutgoingPayload::new(task, categories_enabled);
    let json = serde_json::to_string(&payload).map_err(ShareError::Encode)?;
    let encoded_task = utf8_percent_encode(&json, COMPONENT);
    let encoded_name = utf8_percent_encode(sharer_name, COMPONENT);
    let origin = origin.trim_end_matches('/');
    Ok(format!("{origin}/share?task={encoded_task}&userName={encoded_name}"))
}

/// A decoded, validated share waiting for the recipient's decision.
#[derive(Debug, Clone)]
pub struct IncomingShare {
    /// The shared task, carrying a freshly minted local identifier.
    pub task: Task,
    /// Decoded display name of the sharer.
    pub shared_by: String,
}

impl IncomingShare {
    /// Decode a share from a full URL.
    ///
    /// # Errors
    /// See [`IncomingShare::from_query`].
    pub fn from_url(url: &str) -> Result<Self, ShareError> {
        let query = url.split_once('?').map_or("", |(_, query)| query);
        Self::from_query(query)
    }

    /// Decode a share from the raw query string (`task=...&userName=...`).
    ///
    /// A fresh task identifier is minted immediately; the incoming payload's
    /// identity (if any) is discarded. Colors on the task and on every
    /// carried category must be well-formed 6-digit hex strings, and the
    /// sharer name must fit the username limit.
    ///
    /// # Errors
    /// Returns the specific [`ShareError`] for a missing parameter, an
    /// unparseable payload, a malformed task or category color, or an
    /// oversized sharer name.
    pub fn from_query(query: &str) -> Result<Self, ShareError> {
        let task_param = query_param(query, "task").ok_or(ShareError::MissingParam("task"))?;
        let name_param =
            query_param(query, "userName").ok_or(ShareError::MissingParam("userName"))?;

        let json = percent_decode_str(task_param)
            .decode_utf8()
            .map_err(|err| ShareError::Payload(err.to_string()))?;
        let payload: IncomingPayload =
            serde_json::from_str(&json).map_err(|err| ShareError::Payload(err.to_string()))?;
        let task = payload.into_task()?;

        let shared_by = percent_decode_str(name_param)
            .decode_utf8()
            .map_err(|err| ShareError::Payload(err.to_string()))?
            .into_owned();
        let len = shared_by.chars().count();
        if len > USER_NAME_MAX_LENGTH {
            return Err(ShareError::UserNameTooLong { len });
        }

        Ok(Self { task, shared_by })
    }
}

fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(k, v)| (k == key).then_some(v))
}

/// Sender-side wire shape: the task minus identity and attribution.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutgoingPayload<'a> {
    done: bool,
    pinned: bool,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<&'a str>,
    color: &'a HexColor,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    deadline: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    last_save: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a [Category]>,
}

impl<'a> OutgoingPayload<'a> {
    fn new(task: &'a Task, categories_enabled: bool) -> Self {
        Self {
            done: task.done,
            pinned: task.pinned,
            name: &task.name,
            description: task.description.as_deref(),
            emoji: task.emoji.as_deref(),
            color: &task.color,
            date: task.date,
            deadline: task.deadline,
            last_save: task.last_save,
            category: categories_enabled
                .then(|| task.category.as_deref())
                .flatten(),
        }
    }
}

/// Receiver-side wire shape. Colors stay plain strings here so a malformed
/// task color and a malformed category color surface as distinct errors
/// instead of a generic parse failure.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingPayload {
    done: bool,
    pinned: bool,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    emoji: Option<String>,
    color: String,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    deadline: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    last_save: Option<OffsetDateTime>,
    #[serde(default)]
    category: Option<Vec<IncomingCategory>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingCategory {
    id: CategoryId,
    name: String,
    color: String,
    #[serde(default)]
    emoji: Option<String>,
}

impl IncomingPayload {
    fn into_task(self) -> Result<Task, ShareError> {
        let color: HexColor = self
            .color
            .parse()
            .map_err(|_| ShareError::TaskColor(self.color.clone()))?;

        let category = self
            .category
            .map(|categories| {
                categories
                    .into_iter()
                    .map(|incoming| {
                        let color: HexColor = incoming
                            .color
                            .parse()
                            .map_err(|_| ShareError::CategoryColor(incoming.color.clone()))?;
                        Ok(Category {
                            id: incoming.id,
                            name: incoming.name,
                            color,
                            emoji: incoming.emoji,
                        })
                    })
                    .collect::<Result<Vec<_>, ShareError>>()
            })
            .transpose()?;

        Ok(Task {
            id: TaskId::new(),
            done: self.done,
            pinned: self.pinned,
            name: self.name,
            description: self.description,
            emoji: self.emoji,
            color,
            date: self.date,
            deadline: self.deadline,
            last_save: self.last_save,
            category,
            shared_by: None,
        })
    }
}
