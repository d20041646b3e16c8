// SPDX-License-Identifier: MPL-2.0
//! Playable-source provider port.

use crate::media::{MediaSource, SourceId};
use crate::playback::NotificationKind;

/// Port for the media runtime that owns actual players.
///
/// # Lifecycle
///
/// 1. `create_source` builds a player for a [`MediaSource`]
/// 2. `subscribe` installs an observer per notification kind; the adapter
///    forwards each observed change to `Viewer::handle_notification`
/// 3. `play` / `pause` drive playback
/// 4. `unsubscribe` removes observers, then `release_source` drops the player
///
/// The viewer guarantees each `(source, kind)` pair is subscribed at most
/// once and unsubscribed exactly once, and that all of a source's
/// observers are removed before it is released.
pub trait PlayerBackend {
    fn create_source(&mut self, source: &MediaSource);

    fn release_source(&mut self, source: SourceId);

    fn subscribe(&mut self, source: SourceId, kind: NotificationKind);

    fn unsubscribe(&mut self, source: SourceId, kind: NotificationKind);

    fn play(&mut self, source: SourceId);

    fn pause(&mut self, source: SourceId);
}
