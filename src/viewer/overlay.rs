// SPDX-License-Identifier: MPL-2.0
//! Accessory overlay sub-component: fade visibility, auto-hide timer and
//! anchoring.
//!
//! Visibility is a continuous opacity in `[0, 1]`. Fades start from the
//! value currently on screen, so a toggle in the middle of a fade turns it
//! around instead of queueing a second animation.

use crate::geometry::Transform;
use crate::port::{CoordinateSpace, OverlayHost, RenderSurface, TimerToken};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayAnchor {
    /// Child of the content hierarchy.
    #[default]
    Attached,
    /// Re-parented to the outer, untransformed container.
    Pinned,
}

/// Effects produced by overlay visibility changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AnimateOpacity { to: f32, duration: Duration },
    SetOpacity(f32),
    ScheduleTimer { token: TimerToken, delay: Duration },
    CancelTimer(TimerToken),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    started_at: Option<Instant>,
    duration: Duration,
}

impl Fade {
    fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            started_at: None,
            duration: Duration::ZERO,
        }
    }

    fn value_at(&self, now: Instant) -> f32 {
        let Some(started) = self.started_at else {
            return self.to;
        };
        let elapsed = now.saturating_duration_since(started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * t
    }
}

#[derive(Debug)]
pub struct OverlayAnchorController {
    anchor: OverlayAnchor,
    visible: bool,
    fade: Fade,
    pending_timer: Option<TimerToken>,
    fade_duration: Duration,
    auto_hide_delay: Duration,
}

impl OverlayAnchorController {
    /// Starts hidden and attached.
    #[must_use]
    pub fn new(fade_duration: Duration, auto_hide_delay: Duration) -> Self {
        Self {
            anchor: OverlayAnchor::Attached,
            visible: false,
            fade: Fade::settled(0.0),
            pending_timer: None,
            fade_duration,
            auto_hide_delay,
        }
    }

    /// Requests full or zero opacity. Cancels any pending auto-hide first.
    pub fn set_visible(&mut self, visible: bool, animated: bool, now: Instant) -> Vec<Effect> {
        let mut effects = self.cancel_auto_hide();
        self.apply_visibility(visible, animated, now, &mut effects);
        effects
    }

    /// Replaces any pending auto-hide with a fresh one, but only when a
    /// playable source is attached.
    pub fn schedule_auto_hide(&mut self, has_playable_source: bool) -> Vec<Effect> {
        let mut effects = self.cancel_auto_hide();
        if has_playable_source {
            let token = TimerToken::next();
            self.pending_timer = Some(token);
            tracing::trace!(%token, delay = ?self.auto_hide_delay, "auto-hide scheduled");
            effects.push(Effect::ScheduleTimer {
                token,
                delay: self.auto_hide_delay,
            });
        }
        effects
    }

    /// Timer expiry. Tokens other than the live one are stale and ignored.
    pub fn auto_hide_fired(&mut self, token: TimerToken, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.pending_timer != Some(token) {
            return effects;
        }
        self.pending_timer = None;
        tracing::trace!(%token, "auto-hide fired");
        self.apply_visibility(false, true, now, &mut effects);
        effects
    }

    /// Tap on the content. Ignored while zoomed in, where the zoom surface
    /// owns the gesture.
    pub fn toggle_on_tap(&mut self, zoomed_in: bool, now: Instant) -> Vec<Effect> {
        if zoomed_in {
            return Vec::new();
        }
        self.set_visible(!self.visible, true, now)
    }

    /// Drops opacity to zero at once, e.g. when the viewer starts to
    /// disappear.
    pub fn hide_immediately(&mut self) -> Vec<Effect> {
        let mut effects = self.cancel_auto_hide();
        self.visible = false;
        self.fade = Fade::settled(0.0);
        effects.push(Effect::SetOpacity(0.0));
        effects
    }

    pub fn cancel_auto_hide(&mut self) -> Vec<Effect> {
        self.pending_timer
            .take()
            .map(Effect::CancelTimer)
            .into_iter()
            .collect()
    }

    /// Re-parents the overlay to the root container without moving it on
    /// screen. Frame and transform are computed before the move.
    pub fn pin<H: RenderSurface + OverlayHost + ?Sized>(&mut self, host: &mut H) {
        if self.anchor == OverlayAnchor::Pinned {
            return;
        }
        let parent = host.overlay_parent();
        let frame = host.convert(host.overlay_frame(), parent, CoordinateSpace::Root);
        let transform = host.transform(parent);
        host.reparent_overlay(CoordinateSpace::Root, frame, transform);
        self.anchor = OverlayAnchor::Pinned;
        tracing::debug!(?frame, ?transform, "overlay pinned");
    }

    /// Moves a pinned overlay back under the content container, keeping its
    /// on-screen position.
    pub fn reattach<H: RenderSurface + OverlayHost + ?Sized>(&mut self, host: &mut H) {
        if self.anchor == OverlayAnchor::Attached {
            return;
        }
        let frame = host.convert(
            host.overlay_frame(),
            host.overlay_parent(),
            CoordinateSpace::Content,
        );
        host.reparent_overlay(CoordinateSpace::Content, frame, Transform::IDENTITY);
        self.anchor = OverlayAnchor::Attached;
        tracing::debug!(?frame, "overlay reattached");
    }

    #[must_use]
    pub fn anchor(&self) -> OverlayAnchor {
        self.anchor
    }

    /// Visibility the overlay is at or fading towards.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opacity on screen at `now`.
    #[must_use]
    pub fn opacity_at(&self, now: Instant) -> f32 {
        self.fade.value_at(now)
    }

    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending_timer
    }

    fn apply_visibility(
        &mut self,
        visible: bool,
        animated: bool,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        let to = if visible { 1.0 } else { 0.0 };

        if animated && !self.fade_duration.is_zero() {
            self.fade = Fade {
                from: self.fade.value_at(now),
                to,
                started_at: Some(now),
                duration: self.fade_duration,
            };
            effects.push(Effect::AnimateOpacity {
                to,
                duration: self.fade_duration,
            });
        } else {
            self.fade = Fade::settled(to);
            effects.push(Effect::SetOpacity(to));
        }
    }
}
