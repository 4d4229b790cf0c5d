//! Split component ownership queries.
//!
//! # Responsibility
//! - Fetch each component-kind set from the provider lazily, once.
//! - Answer exact-match membership queries against the cached sets.
//!
//! # Invariants
//! - The provider is asked at most once per kind per classifier, even when
//!   several threads query an unfetched kind at the same time.
//! - An absent set is a final answer and is never re-fetched.
//! - Queries never fail; absent data answers `false`.

use crate::extension::provider::SplitComponentInfoProvider;
use log::debug;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Component kinds a split may own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Activity,
    Service,
    Receiver,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [Self::Activity, Self::Service, Self::Receiver];

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Service => "service",
            Self::Receiver => "receiver",
        }
    }

    /// Parses a stable string id (`activity|service|receiver`).
    pub fn parse(value: &str) -> Result<Self, ComponentKindError> {
        match value.trim() {
            "activity" => Ok(Self::Activity),
            "service" => Ok(Self::Service),
            "receiver" => Ok(Self::Receiver),
            other => Err(ComponentKindError(other.to_string())),
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Activity => 0,
            Self::Service => 1,
            Self::Receiver => 2,
        }
    }
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown component kind id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentKindError(pub String);

impl Display for ComponentKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported component kind `{}`; expected activity|service|receiver",
            self.0
        )
    }
}

impl Error for ComponentKindError {}

/// Diagnostic view of one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Unfetched,
    /// Fetched and present with this many distinct names.
    Present(usize),
    Absent,
}

/// Lazily-populated membership sets for the three component kinds.
///
/// Slot contents: empty cell = unfetched, `Some(set)` = fetched-present,
/// `None` = fetched-absent.
#[derive(Debug, Default)]
pub struct MembershipClassifier {
    slots: [OnceCell<Option<BTreeSet<String>>>; 3],
}

impl MembershipClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_activity_member(
        &self,
        provider: &dyn SplitComponentInfoProvider,
        name: &str,
    ) -> bool {
        self.is_member(provider, ComponentKind::Activity, name)
    }

    pub fn is_service_member(
        &self,
        provider: &dyn SplitComponentInfoProvider,
        name: &str,
    ) -> bool {
        self.is_member(provider, ComponentKind::Service, name)
    }

    pub fn is_receiver_member(
        &self,
        provider: &dyn SplitComponentInfoProvider,
        name: &str,
    ) -> bool {
        self.is_member(provider, ComponentKind::Receiver, name)
    }

    /// Returns true iff the cached set for `kind` exists and contains `name`.
    pub fn is_member(
        &self,
        provider: &dyn SplitComponentInfoProvider,
        kind: ComponentKind,
        name: &str,
    ) -> bool {
        self.names(provider, kind)
            .map(|names| names.contains(name))
            .unwrap_or(false)
    }

    /// Fetches every unfetched kind now.
    pub fn preload(&self, provider: &dyn SplitComponentInfoProvider) {
        for kind in ComponentKind::ALL {
            let _ = self.names(provider, kind);
        }
    }

    pub fn state(&self, kind: ComponentKind) -> CacheState {
        match self.slots[kind.slot()].get() {
            None => CacheState::Unfetched,
            Some(Some(names)) => CacheState::Present(names.len()),
            Some(None) => CacheState::Absent,
        }
    }

    fn names(
        &self,
        provider: &dyn SplitComponentInfoProvider,
        kind: ComponentKind,
    ) -> Option<&BTreeSet<String>> {
        self.slots[kind.slot()]
            .get_or_init(|| fetch(provider, kind))
            .as_ref()
    }
}

fn fetch(
    provider: &dyn SplitComponentInfoProvider,
    kind: ComponentKind,
) -> Option<BTreeSet<String>> {
    let names = match kind {
        ComponentKind::Activity => provider.split_activities(),
        ComponentKind::Service => provider.split_services(),
        ComponentKind::Receiver => provider.split_receivers(),
    };
    match &names {
        Some(list) => debug!(
            "event=membership_fetch module=extension status=ok kind={} count={}",
            kind,
            list.len()
        ),
        None => debug!(
            "event=membership_fetch module=extension status=absent kind={}",
            kind
        ),
    }
    names.map(|list| list.into_iter().collect())
}
