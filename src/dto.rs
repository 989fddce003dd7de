//! Outbound wire model for push events.
//!
//! Plain immutable records, constructed once with all fields known and
//! serialized only at the delivery boundary. Field names follow the
//! receiving API's camelCase contract.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Normalized, deduplicated classification of the file paths touched by a
/// changeset or a whole push.
///
/// `moved` and `copied` entries carry both endpoints in a single
/// `"old --> new"` string. Ordered sets keep the serialized payload
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChanges {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub modified: BTreeSet<String>,
    pub moved: BTreeSet<String>,
    pub copied: BTreeSet<String>,
}

/// One commit of the push.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub commit_id: String,
    pub commit_message: String,
    pub author: String,
    pub date_committed: DateTime<Utc>,
    pub branches: Vec<String>,
    pub files_changed: FileChanges,
}

/// One accepted push, the event payload body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Push {
    pub repository_id: String,
    pub repository_name: String,
    pub repository_namespace: String,
    /// Pushing user; omitted for anonymous pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub date_pushed: DateTime<Utc>,
    /// Commits in push order, oldest first.
    pub commits: Vec<Commit>,
}

/// Top-level delivery payload, one per hook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: String,
    pub time: String,
    pub data: Push,
}
