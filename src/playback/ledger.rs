// SPDX-License-Identifier: MPL-2.0
//! Registry of live notification subscriptions, per source and per kind.
//!
//! Membership in the ledger is the single source of truth for "is this
//! source observed": there is no separate flag that could drift from it.
//! A notification whose `(source, kind)` pair is not in the ledger belongs
//! to a source that was already torn down and must be dropped.

use super::notification::NotificationKind;
use crate::media::SourceId;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct ObservationLedger {
    entries: HashMap<SourceId, BTreeSet<NotificationKind>>,
}

impl ObservationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records each kind not already recorded for `source`.
    ///
    /// Returns only the newly added kinds, in the order given; the caller
    /// installs host observers for exactly these, so a kind can never be
    /// observed twice.
    pub fn subscribe(
        &mut self,
        source: SourceId,
        kinds: impl IntoIterator<Item = NotificationKind>,
    ) -> Vec<NotificationKind> {
        let active = self.entries.entry(source).or_default();
        kinds
            .into_iter()
            .filter(|kind| active.insert(*kind))
            .collect()
    }

    /// Removes every kind recorded for `source` and forgets the source.
    ///
    /// Returns the kinds that were active; empty when the source had none,
    /// which makes repeated calls harmless.
    pub fn unsubscribe_all(&mut self, source: SourceId) -> Vec<NotificationKind> {
        self.entries
            .remove(&source)
            .map(|kinds| kinds.into_iter().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_subscribed(&self, source: SourceId, kind: NotificationKind) -> bool {
        self.entries
            .get(&source)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Kinds currently active for `source`.
    #[must_use]
    pub fn active_kinds(&self, source: SourceId) -> Vec<NotificationKind> {
        self.entries
            .get(&source)
            .map(|kinds| kinds.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Sources with at least one live subscription.
    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.entries
            .iter()
            .filter(|(_, kinds)| !kinds.is_empty())
            .map(|(source, _)| *source)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }
}
