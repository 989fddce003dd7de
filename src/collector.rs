//! Path collection: turning raw per-revision modifications into a
//! normalized, deduplicated [`FileChanges`] record.

use tracing::warn;

use crate::dto::FileChanges;
use crate::errors::CollectError;
use crate::hook::{Changeset, ChangesetSession, Modifications};

/// Collects the file-level changes of one or more changesets.
///
/// The collector owns its repository session exclusively for the duration
/// of one collection; dropping the collector releases the session on every
/// exit path.
pub struct PathCollector<S> {
    session: S,
}

impl<S: ChangesetSession> PathCollector<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Collects the changes of a single changeset.
    ///
    /// Shares the [`collect_all`](Self::collect_all) code path, so
    /// commit-level and push-level collection normalize and encode paths
    /// identically.
    pub fn collect_single(&mut self, changeset: &Changeset) -> Result<FileChanges, CollectError> {
        self.collect_all(std::slice::from_ref(changeset))
    }

    /// Collects the changes of every changeset, in order, into one
    /// deduplicated [`FileChanges`].
    ///
    /// A changeset without a modification record is warned about and
    /// skipped; a failing lookup aborts the whole collection.
    pub fn collect_all(&mut self, changesets: &[Changeset]) -> Result<FileChanges, CollectError> {
        let mut changes = FileChanges::default();
        for changeset in changesets {
            match self.session.modifications(&changeset.id)? {
                Some(modifications) => sort_into(&mut changes, &modifications),
                None => warn!(changeset = %changeset.id, "no modifications for changeset"),
            }
        }
        Ok(changes)
    }
}

/// Sorts one revision's modifications into the matching change sets.
fn sort_into(changes: &mut FileChanges, modifications: &Modifications) {
    for path in &modifications.added {
        changes.added.insert(normalize_path(path).to_string());
    }
    for path in &modifications.removed {
        changes.removed.insert(normalize_path(path).to_string());
    }
    for path in &modifications.modified {
        changes.modified.insert(normalize_path(path).to_string());
    }
    for renamed in &modifications.renamed {
        changes
            .moved
            .insert(join_endpoints(&renamed.old_path, &renamed.new_path));
    }
    for copied in &modifications.copied {
        changes
            .copied
            .insert(join_endpoints(&copied.source_path, &copied.target_path));
    }
}

/// Strips a single leading `/`; paths are otherwise kept verbatim.
fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Encodes a rename/copy as one `"old --> new"` entry.
///
/// The endpoints are combined first and the combined string normalized,
/// matching the commit-path treatment of a plain path.
fn join_endpoints(from: &str, to: &str) -> String {
    normalize_path(&format!("{from} --> {to}")).to_string()
}
