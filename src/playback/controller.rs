// SPDX-License-Identifier: MPL-2.0
//! Media readiness controller.
//!
//! Owns the attached [`MediaSource`] and its subscription set, and turns
//! readiness notifications into player and loading-indicator commands.
//! The controller never talks to the host directly: every operation returns
//! the [`Effect`]s the host must apply, in order.

use super::ledger::ObservationLedger;
use super::notification::{Notification, NotificationKind, SourceStatus};
use super::state::PlaybackState;
use crate::geometry::Size;
use crate::media::{MediaSource, SourceId};
use std::collections::HashSet;

/// Commands for the playable-source host and the loading indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Build the host-side player for this source.
    CreateSource(MediaSource),
    /// The host may drop its player for this source.
    ReleaseSource(SourceId),
    Subscribe {
        source: SourceId,
        kind: NotificationKind,
    },
    Unsubscribe {
        source: SourceId,
        kind: NotificationKind,
    },
    Play(SourceId),
    Pause(SourceId),
    ShowLoadingIndicator,
    HideLoadingIndicator,
    /// The video's natural size changed; the content-fit rectangle is stale.
    RecomputeContentFit(Size),
}

#[derive(Debug)]
pub struct MediaReadinessController {
    source: Option<MediaSource>,
    ledger: ObservationLedger,
    state: PlaybackState,
    status: SourceStatus,
    presentation_size: Size,
    indicator_visible: bool,
    /// Every id ever attached. Notifications can still be in flight for
    /// any of them, so none is ever attached twice.
    attached_ids: HashSet<SourceId>,
}

impl Default for MediaReadinessController {
    fn default() -> Self {
        Self {
            source: None,
            ledger: ObservationLedger::new(),
            state: PlaybackState::Idle,
            status: SourceStatus::Unknown,
            presentation_size: Size::ZERO,
            indicator_visible: false,
            attached_ids: HashSet::new(),
        }
    }
}

impl MediaReadinessController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the attached source.
    ///
    /// The previous source's subscriptions are removed from the ledger
    /// before the new ones are recorded, and the returned effects keep that
    /// order, so nothing still in flight for the old source can be
    /// attributed to the new one.
    ///
    /// A source whose id was attached before (a clone of an earlier one) is
    /// reissued under a fresh id; read the id back with [`Self::source_id`].
    pub fn attach(&mut self, source: MediaSource) -> Vec<Effect> {
        let mut effects = self.teardown();

        let source = if self.attached_ids.insert(source.id()) {
            source
        } else {
            let fresh = source.reissue();
            tracing::debug!(previous = %source.id(), source = %fresh.id(), "reissuing re-attached media source");
            self.attached_ids.insert(fresh.id());
            fresh
        };

        tracing::debug!(source = %source.id(), uri = source.uri(), remote = source.is_remote(), "attaching media source");

        self.state = PlaybackState::Loading;
        self.status = SourceStatus::Unknown;
        self.presentation_size = Size::ZERO;

        if source.is_remote() {
            self.show_indicator(&mut effects);
        } else {
            self.hide_indicator(&mut effects);
        }

        let id = source.id();
        effects.push(Effect::CreateSource(source.clone()));
        effects.extend(
            self.ledger
                .subscribe(id, NotificationKind::ALL)
                .into_iter()
                .map(|kind| Effect::Subscribe { source: id, kind }),
        );
        self.source = Some(source);

        effects
    }

    /// Tears down the attached source. Safe to call at any point, any
    /// number of times.
    pub fn detach(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(source) = &self.source {
            effects.push(Effect::Pause(source.id()));
        }
        effects.extend(self.teardown());
        self.hide_indicator(&mut effects);
        self.state = PlaybackState::Idle;
        self.status = SourceStatus::Unknown;
        effects
    }

    /// Applies one readiness notification delivered for `source`.
    ///
    /// Notifications for a source (or kind) that is not in the ledger are
    /// stale and dropped without touching any state.
    pub fn handle_notification(
        &mut self,
        source: SourceId,
        notification: Notification,
    ) -> Vec<Effect> {
        let kind = notification.kind();
        if !self.ledger.is_subscribed(source, kind) {
            tracing::trace!(source = %source, %kind, "dropping notification for unobserved source");
            return Vec::new();
        }

        let mut effects = Vec::new();
        let previous = self.state;

        match notification {
            Notification::StatusChanged(status) => {
                self.status = status;
                match status {
                    SourceStatus::ReadyToPlay => self.start_playing(source, &mut effects),
                    SourceStatus::Unknown => {
                        self.state = PlaybackState::Loading;
                        effects.push(Effect::Pause(source));
                        self.show_indicator(&mut effects);
                    }
                    SourceStatus::Failed => {
                        // A failed load is not loading: stop and leave the
                        // retry decision to the caller.
                        self.state = PlaybackState::Failed;
                        effects.push(Effect::Pause(source));
                        self.hide_indicator(&mut effects);
                    }
                }
            }
            Notification::LikelyToKeepUp(true) => {
                if self.state.is_waiting() {
                    self.start_playing(source, &mut effects);
                }
            }
            Notification::LikelyToKeepUp(false) => {}
            Notification::BufferEmpty(true) => match self.state {
                // Indicator only: playback is not paused on an empty buffer.
                PlaybackState::Loading
                | PlaybackState::ReadyPlaying
                | PlaybackState::Buffering => {
                    self.state = PlaybackState::Buffering;
                    self.show_indicator(&mut effects);
                }
                // A paused source is not waiting on anything, and keep-up
                // never resumes it, so an indicator here would never clear.
                PlaybackState::ReadyPaused => {
                    tracing::trace!(source = %source, "buffer empty while paused");
                }
                PlaybackState::Idle | PlaybackState::Failed => {}
            },
            Notification::BufferEmpty(false) => {}
            Notification::PresentationSizeChanged(size) => {
                self.presentation_size = size;
                effects.push(Effect::RecomputeContentFit(size));
            }
        }

        if previous != self.state {
            tracing::debug!(source = %source, from = ?previous, to = ?self.state, "playback state changed");
        }
        effects
    }

    /// Explicit play request. Only a ready source can be played.
    pub fn play(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(id) = self.source_id() {
            if self.state.is_ready() {
                self.start_playing(id, &mut effects);
            }
        }
        effects
    }

    /// Explicit pause request.
    pub fn pause(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(id) = self.source_id() else {
            return effects;
        };
        match self.state {
            PlaybackState::ReadyPlaying => self.state = PlaybackState::ReadyPaused,
            PlaybackState::Buffering if self.status == SourceStatus::ReadyToPlay => {
                self.state = PlaybackState::ReadyPaused;
                self.hide_indicator(&mut effects);
            }
            _ => {}
        }
        effects.push(Effect::Pause(id));
        effects
    }

    /// Plays if the host already reported the source ready to play.
    pub fn resume_if_ready(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(id) = self.source_id() {
            if self.status == SourceStatus::ReadyToPlay {
                self.start_playing(id, &mut effects);
            }
        }
        effects
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn status(&self) -> SourceStatus {
        self.status
    }

    #[must_use]
    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn source_id(&self) -> Option<SourceId> {
        self.source.as_ref().map(MediaSource::id)
    }

    /// True when a source capable of playback is attached.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn presentation_size(&self) -> Size {
        self.presentation_size
    }

    #[must_use]
    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    #[must_use]
    pub fn ledger(&self) -> &ObservationLedger {
        &self.ledger
    }

    fn start_playing(&mut self, source: SourceId, effects: &mut Vec<Effect>) {
        self.state = PlaybackState::ReadyPlaying;
        self.hide_indicator(effects);
        effects.push(Effect::Play(source));
    }

    fn teardown(&mut self) -> Vec<Effect> {
        let Some(old) = self.source.take() else {
            return Vec::new();
        };
        let id = old.id();
        let mut effects: Vec<Effect> = self
            .ledger
            .unsubscribe_all(id)
            .into_iter()
            .map(|kind| Effect::Unsubscribe { source: id, kind })
            .collect();
        effects.push(Effect::ReleaseSource(id));
        tracing::debug!(source = %id, "media source torn down");
        effects
    }

    fn show_indicator(&mut self, effects: &mut Vec<Effect>) {
        if !self.indicator_visible {
            self.indicator_visible = true;
            effects.push(Effect::ShowLoadingIndicator);
        }
    }

    fn hide_indicator(&mut self, effects: &mut Vec<Effect>) {
        if self.indicator_visible {
            self.indicator_visible = false;
            effects.push(Effect::HideLoadingIndicator);
        }
    }
}

impl Drop for MediaReadinessController {
    fn drop(&mut self) {
        if self.ledger.is_empty() || std::thread::panicking() {
            return;
        }
        let leaked: Vec<SourceId> = self.ledger.sources().collect();
        tracing::error!(?leaked, "readiness controller dropped without detach");
        debug_assert!(
            false,
            "MediaReadinessController dropped with live subscriptions: {leaked:?}"
        );
    }
}
