// SPDX-License-Identifier: MPL-2.0
//! One-shot timers on the tokio clock.

use super::HostEvent;
use crate::port::{TimerScheduler, TimerToken};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Schedules each timer as a sleeping task that posts
/// [`HostEvent::TimerFired`] back to the event loop.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    events: mpsc::UnboundedSender<HostEvent>,
    pending: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioTimers {
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self {
            events,
            pending: HashMap::new(),
        }
    }

    /// Timers not yet fired or cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.values().filter(|task| !task.is_finished()).count()
    }
}

impl TimerScheduler for TokioTimers {
    fn schedule_timer(&mut self, token: TimerToken, delay: Duration) {
        self.pending.retain(|_, task| !task.is_finished());

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(HostEvent::TimerFired(token)).is_err() {
                tracing::trace!(%token, "timer fired after event loop closed");
            }
        });
        if let Some(previous) = self.pending.insert(token, task) {
            previous.abort();
        }
    }

    fn cancel_timer(&mut self, token: TimerToken) {
        if let Some(task) = self.pending.remove(&token) {
            task.abort();
        }
    }

    fn timer_expired(&mut self, token: TimerToken) {
        self.pending.remove(&token);
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timer_posts_event_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TokioTimers::new(tx);
        let token = TimerToken::next();

        timers.schedule_timer(token, Duration::from_millis(300));

        match rx.recv().await {
            Some(HostEvent::TimerFired(fired)) => assert_eq!(fired, token),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expired_timer_is_forgotten() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TokioTimers::new(tx);
        let token = TimerToken::next();
        timers.schedule_timer(token, Duration::from_millis(50));

        let Some(HostEvent::TimerFired(fired)) = rx.recv().await else {
            panic!("timer did not fire");
        };
        timers.timer_expired(fired);

        assert!(timers.pending.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TokioTimers::new(tx);
        let cancelled = TimerToken::next();
        let kept = TimerToken::next();

        timers.schedule_timer(cancelled, Duration::from_millis(100));
        timers.schedule_timer(kept, Duration::from_millis(200));
        timers.cancel_timer(cancelled);
        assert_eq!(timers.pending(), 1);

        match rx.recv().await {
            Some(HostEvent::TimerFired(fired)) => assert_eq!(fired, kept),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
