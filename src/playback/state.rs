// SPDX-License-Identifier: MPL-2.0
//! Playback readiness state.
//!
//! - Idle: no source attached
//! - Loading: source attached, readiness not yet reported
//! - Buffering: playback stalled on an empty buffer
//! - ReadyPaused: source ready, playback paused
//! - ReadyPlaying: source ready, playback running
//! - Failed: the host reported the source cannot be played

/// Readiness of the attached media source.
///
/// Transitions are driven only by readiness notifications and explicit
/// play/pause requests; see `MediaReadinessController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Buffering,
    ReadyPaused,
    ReadyPlaying,
    Failed,
}

impl PlaybackState {
    /// Returns true if the player has been told to play.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::ReadyPlaying)
    }

    /// Returns true while the source is waiting on the network or decoder.
    #[must_use]
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::Loading | Self::Buffering)
    }

    /// Returns true once the source reported it can play.
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::ReadyPaused | Self::ReadyPlaying)
    }

    #[must_use]
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(PlaybackState::default(), PlaybackState::Idle);
    }

    #[test]
    fn waiting_states() {
        assert!(PlaybackState::Loading.is_waiting());
        assert!(PlaybackState::Buffering.is_waiting());
        assert!(!PlaybackState::ReadyPlaying.is_waiting());
        assert!(!PlaybackState::Failed.is_waiting());
    }

    #[test]
    fn ready_states() {
        assert!(PlaybackState::ReadyPaused.is_ready());
        assert!(PlaybackState::ReadyPlaying.is_ready());
        assert!(PlaybackState::ReadyPlaying.is_playing());
        assert!(!PlaybackState::ReadyPaused.is_playing());
        assert!(!PlaybackState::Buffering.is_ready());
    }
}
