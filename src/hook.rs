//! Host-facing input model for post-receive hook invocations.
//!
//! These types describe what the hosting SCM hands over when a push is
//! accepted: a repository reference, the ordered changesets of the push,
//! and (when the backend supports it) a capability to look up per-revision
//! modifications. Everything here is borrowed for one invocation and never
//! mutated.

use chrono::{DateTime, Utc};

use crate::errors::CollectError;

/// Identity of the repository that received the push.
#[derive(Debug, Clone)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub namespace: String,
}

/// One commit record as reported by the version-control backend.
///
/// Changesets arrive in push order, oldest first; the last element of the
/// sequence is the latest commit of the push.
#[derive(Debug, Clone)]
pub struct Changeset {
    pub id: String,
    pub description: String,
    pub author: String,
    pub creation_date: DateTime<Utc>,
    pub branches: Vec<String>,
}

/// A file rename recorded by the backend.
#[derive(Debug, Clone)]
pub struct RenamedPath {
    pub old_path: String,
    pub new_path: String,
}

/// A file copy recorded by the backend.
#[derive(Debug, Clone)]
pub struct CopiedPath {
    pub source_path: String,
    pub target_path: String,
}

/// File-level changes belonging to one changeset, classified by the
/// backend into five disjoint lists.
#[derive(Debug, Clone, Default)]
pub struct Modifications {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
    pub renamed: Vec<RenamedPath>,
    pub copied: Vec<CopiedPath>,
}

/// Capability for opening repository sessions that resolve modifications.
///
/// The host owns the underlying resource pool. The forwarder opens one
/// session per collection and releases it by dropping the session, so a
/// session is held exactly as long as one collection runs.
pub trait ChangeProvider {
    type Session: ChangesetSession;

    fn open_session(&self, repository: &Repository) -> Result<Self::Session, CollectError>;
}

/// An exclusively-owned repository session resolving the modifications of
/// a single revision.
///
/// `Ok(None)` means the backend has no modification record for the
/// revision; the collector warns and skips it. `Err` means the lookup
/// itself failed and aborts the whole collection.
pub trait ChangesetSession {
    fn modifications(&mut self, revision: &str) -> Result<Option<Modifications>, CollectError>;
}

/// Stand-in provider type for hosts without changeset support.
///
/// Uninhabited, so `PushHookEvent::change_provider` can only ever be
/// `None` for it.
#[derive(Debug, Clone, Copy)]
pub enum NoChangeProvider {}

impl ChangeProvider for NoChangeProvider {
    type Session = NoChangeProvider;

    fn open_session(&self, _repository: &Repository) -> Result<Self::Session, CollectError> {
        match *self {}
    }
}

impl ChangesetSession for NoChangeProvider {
    fn modifications(&mut self, _revision: &str) -> Result<Option<Modifications>, CollectError> {
        match *self {}
    }
}

/// One accepted push as handed over by the host's hook dispatch.
pub struct PushHookEvent<'a, P> {
    /// Repository the push landed in; `None` mirrors a hook fired without
    /// repository context (warned about and skipped).
    pub repository: Option<&'a Repository>,
    /// Changesets of the push in host order, oldest first.
    pub changesets: &'a [Changeset],
    /// Modification lookup capability; `None` when the backend does not
    /// support a changeset provider.
    pub change_provider: Option<&'a P>,
}

/// Acting user as resolved by the host's authentication layer.
#[derive(Debug, Clone)]
pub struct Subject {
    principal: Option<String>,
    user_role: bool,
}

impl Subject {
    /// An authenticated subject holding the user role.
    pub fn user(principal: impl Into<String>) -> Self {
        Self {
            principal: Some(principal.into()),
            user_role: true,
        }
    }

    /// A subject without the user role (system or anonymous caller).
    pub fn anonymous() -> Self {
        Self {
            principal: None,
            user_role: false,
        }
    }

    pub fn has_user_role(&self) -> bool {
        self.user_role
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;

    use super::*;

    /// In-memory change provider resolving modifications from a map keyed
    /// by revision id.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct MapProvider {
        pub modifications: HashMap<String, Modifications>,
    }

    impl ChangeProvider for MapProvider {
        type Session = MapSession;

        fn open_session(&self, _repository: &Repository) -> Result<MapSession, CollectError> {
            Ok(MapSession {
                modifications: self.modifications.clone(),
            })
        }
    }

    #[derive(Debug)]
    pub(crate) struct MapSession {
        pub modifications: HashMap<String, Modifications>,
    }

    impl ChangesetSession for MapSession {
        fn modifications(&mut self, revision: &str) -> Result<Option<Modifications>, CollectError> {
            Ok(self.modifications.get(revision).cloned())
        }
    }

    /// Provider whose sessions always fail, for abort-path tests.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct BrokenProvider;

    impl ChangeProvider for BrokenProvider {
        type Session = BrokenSession;

        fn open_session(&self, _repository: &Repository) -> Result<BrokenSession, CollectError> {
            Ok(BrokenSession)
        }
    }

    #[derive(Debug)]
    pub(crate) struct BrokenSession;

    impl ChangesetSession for BrokenSession {
        fn modifications(&mut self, _revision: &str) -> Result<Option<Modifications>, CollectError> {
            Err(CollectError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionAborted,
                "connection lost",
            )))
        }
    }

    pub(crate) fn repository() -> Repository {
        Repository {
            id: "42".into(),
            name: "heart-of-gold".into(),
            namespace: "hitchhiker".into(),
        }
    }

    pub(crate) fn changeset(id: &str, creation_date: DateTime<Utc>) -> Changeset {
        Changeset {
            id: id.into(),
            description: format!("commit {id}"),
            author: "Arthur Dent <arthur@example.com>".into(),
            creation_date,
            branches: vec!["main".into()],
        }
    }
}
