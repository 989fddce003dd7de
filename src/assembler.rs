//! Push-event assembly: repository + ordered changesets → delivery payload.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::collector::PathCollector;
use crate::dto::{Commit, Event, FileChanges, Push};
use crate::errors::CollectError;
use crate::hook::{ChangeProvider, Changeset, Repository, Subject};

/// Builds the delivery payload for one accepted push.
///
/// Changesets are consumed in host order, oldest first; the last element
/// determines `date_pushed` regardless of individual commit timestamps.
///
/// Per-commit file changes are collected through a fresh repository
/// session per changeset when `change_provider` is available and degrade
/// to empty records when it is not. A failing collection aborts the whole
/// assembly, so no partial event is ever produced.
pub fn assemble<P: ChangeProvider>(
    repository: &Repository,
    changesets: &[Changeset],
    change_provider: Option<&P>,
    subject: &Subject,
) -> Result<Event, CollectError> {
    let user = resolve_user(subject);

    let mut commits = Vec::with_capacity(changesets.len());
    for changeset in changesets {
        let files_changed = match change_provider {
            Some(provider) => {
                let session = provider.open_session(repository)?;
                PathCollector::new(session).collect_single(changeset)?
            }
            None => FileChanges::default(),
        };

        commits.push(Commit {
            commit_id: changeset.id.clone(),
            commit_message: changeset.description.clone(),
            author: changeset.author.clone(),
            date_committed: changeset.creation_date,
            branches: changeset.branches.clone(),
            files_changed,
        });
    }

    // Iteration order decides the push timestamp, not the maximum commit
    // timestamp. Empty pushes are filtered out by the hook handler.
    let date_pushed = match commits.last() {
        Some(commit) => commit.date_committed,
        None => Utc::now(),
    };

    let push = Push {
        repository_id: repository.id.clone(),
        repository_name: repository.name.clone(),
        repository_namespace: repository.namespace.clone(),
        user,
        date_pushed,
        commits,
    };

    Ok(Event {
        id: Uuid::new_v4().to_string(),
        time: Utc::now().to_rfc3339(),
        data: push,
    })
}

/// Resolves the pushing user from the host subject.
///
/// A subject without the user role or with an empty principal degrades to
/// an anonymous push record.
fn resolve_user(subject: &Subject) -> Option<String> {
    if !subject.has_user_role() {
        warn!("subject has no user role, push recorded without user");
        return None;
    }
    match subject.principal() {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            warn!("principal name is missing or empty, push recorded without user");
            None
        }
    }
}
