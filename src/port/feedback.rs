// SPDX-License-Identifier: MPL-2.0
//! Loading indicator and cooperative timer ports.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_TIMER_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one scheduled one-shot timer.
///
/// Tokens are never reused, so an expiry that races a cancellation can be
/// recognized as stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_TIMER_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub trait LoadingIndicator {
    fn show_loading_indicator(&mut self);

    fn hide_loading_indicator(&mut self);
}

/// One-shot timers on the UI thread.
///
/// When a timer expires the host calls `Viewer::timer_fired` with its
/// token. A cancelled timer must not fire; if cancellation loses a race
/// with expiry, the viewer discards the stale token.
pub trait TimerScheduler {
    fn schedule_timer(&mut self, token: TimerToken, delay: Duration);

    fn cancel_timer(&mut self, token: TimerToken);

    /// `token` fired and was delivered; the scheduler can forget it.
    fn timer_expired(&mut self, _token: TimerToken) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let a = TimerToken::next();
        let b = TimerToken::next();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("timer#"));
    }
}
