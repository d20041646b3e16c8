// SPDX-License-Identifier: MPL-2.0
//! Tap gesture interpretation.
//!
//! A single tap is held back until the double-tap window closes. If a
//! second tap (or a host-recognized double tap) arrives first, the held tap
//! is discarded and only the double tap is dispatched, so a single tap
//! never fires as part of a double tap.

use crate::geometry::{self, Point, Size};
use crate::port::{TimerToken, ZoomScale, ZoomTarget};
use std::time::Duration;

/// What a recognized gesture asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    ToggleOverlay,
    Zoom(ZoomTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleTimer { token: TimerToken, delay: Duration },
    CancelTimer(TimerToken),
    Dispatch(Intent),
}

#[derive(Debug, Clone, Copy)]
struct PendingTap {
    token: TimerToken,
    location: Point,
}

#[derive(Debug)]
pub struct GestureInterpreter {
    pending: Option<PendingTap>,
    double_tap_window: Duration,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(double_tap_window: Duration) -> Self {
        Self {
            pending: None,
            double_tap_window,
        }
    }

    /// Raw single tap at `location` (zoomable content coordinates).
    ///
    /// A tap arriving while another is held completes a double tap.
    pub fn single_tap(&mut self, location: Point, zoom: ZoomScale, viewport: Size) -> Vec<Effect> {
        if self.pending.is_some() {
            return self.double_tap(location, zoom, viewport);
        }
        let token = TimerToken::next();
        self.pending = Some(PendingTap { token, location });
        vec![Effect::ScheduleTimer {
            token,
            delay: self.double_tap_window,
        }]
    }

    /// Double tap: zoom in around `location`, or back out when already
    /// zoomed in.
    pub fn double_tap(&mut self, location: Point, zoom: ZoomScale, viewport: Size) -> Vec<Effect> {
        let mut effects = self.cancel();
        let target = if zoom.is_zoomed_in() {
            ZoomTarget::Minimum {
                scale: zoom.minimum,
            }
        } else {
            ZoomTarget::Rect {
                scale: zoom.maximum,
                visible: geometry::zoom_target_rect(location, zoom.maximum, viewport),
            }
        };
        tracing::trace!(?location, ?target, "double tap");
        effects.push(Effect::Dispatch(Intent::Zoom(target)));
        effects
    }

    /// The double-tap window for the held tap closed: it was a single tap.
    ///
    /// While zoomed in the content absorbs single taps.
    pub fn timer_fired(&mut self, token: TimerToken, zoom: ZoomScale) -> Vec<Effect> {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                tracing::trace!(location = ?pending.location, "single tap confirmed");
                if zoom.is_zoomed_in() {
                    Vec::new()
                } else {
                    vec![Effect::Dispatch(Intent::ToggleOverlay)]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Drops any held tap.
    pub fn cancel(&mut self) -> Vec<Effect> {
        self.pending
            .take()
            .map(|pending| Effect::CancelTimer(pending.token))
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn has_pending_tap(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);
    const VIEWPORT: Size = Size {
        width: 320.0,
        height: 480.0,
    };

    const UNZOOMED: ZoomScale = ZoomScale {
        current: 1.0,
        minimum: 1.0,
        maximum: 3.0,
    };

    const ZOOMED: ZoomScale = ZoomScale {
        current: 2.0,
        minimum: 1.0,
        maximum: 3.0,
    };

    fn held_token(effects: &[Effect]) -> TimerToken {
        match effects {
            [Effect::ScheduleTimer { token, delay }] => {
                assert_eq!(*delay, WINDOW);
                *token
            }
            other => panic!("expected a single scheduled timer, got {other:?}"),
        }
    }

    #[test]
    fn single_tap_is_held_until_window_closes() {
        let mut gestures = GestureInterpreter::new(WINDOW);
        let token = held_token(&gestures.single_tap(Point::new(10.0, 10.0), UNZOOMED, VIEWPORT));
        assert!(gestures.has_pending_tap());

        let effects = gestures.timer_fired(token, UNZOOMED);

        assert_eq!(effects, vec![Effect::Dispatch(Intent::ToggleOverlay)]);
        assert!(!gestures.has_pending_tap());
    }

    #[test]
    fn single_tap_while_zoomed_dispatches_nothing() {
        let mut gestures = GestureInterpreter::new(WINDOW);
        let token = held_token(&gestures.single_tap(Point::ORIGIN, ZOOMED, VIEWPORT));
        assert!(gestures.timer_fired(token, ZOOMED).is_empty());
    }

    #[test]
    fn second_tap_becomes_double_tap() {
        let mut gestures = GestureInterpreter::new(WINDOW);
        let token = held_token(&gestures.single_tap(Point::new(100.0, 50.0), UNZOOMED, VIEWPORT));

        let effects = gestures.single_tap(Point::new(100.0, 50.0), UNZOOMED, VIEWPORT);

        assert_eq!(effects[0], Effect::CancelTimer(token));
        assert!(matches!(
            effects[1],
            Effect::Dispatch(Intent::Zoom(ZoomTarget::Rect { scale, .. })) if scale == 3.0
        ));
        assert!(gestures.timer_fired(token, UNZOOMED).is_empty());
    }

    #[test]
    fn double_tap_suppresses_held_single_tap() {
        let mut gestures = GestureInterpreter::new(WINDOW);
        let token = held_token(&gestures.single_tap(Point::ORIGIN, UNZOOMED, VIEWPORT));

        gestures.double_tap(Point::ORIGIN, UNZOOMED, VIEWPORT);

        assert!(!gestures.has_pending_tap());
        assert!(gestures.timer_fired(token, UNZOOMED).is_empty());
    }

    #[test]
    fn double_tap_zooms_to_point_when_unzoomed() {
        let mut gestures = GestureInterpreter::new(WINDOW);
        let effects = gestures.double_tap(Point::new(100.0, 50.0), UNZOOMED, VIEWPORT);

        let expected = ZoomTarget::Rect {
            scale: 3.0,
            visible: geometry::zoom_target_rect(Point::new(100.0, 50.0), 3.0, VIEWPORT),
        };
        assert_eq!(effects, vec![Effect::Dispatch(Intent::Zoom(expected))]);
    }

    #[test]
    fn double_tap_zooms_out_when_zoomed() {
        let mut gestures = GestureInterpreter::new(WINDOW);
        let effects = gestures.double_tap(Point::ORIGIN, ZOOMED, VIEWPORT);
        assert_eq!(
            effects,
            vec![Effect::Dispatch(Intent::Zoom(ZoomTarget::Minimum { scale: 1.0 }))]
        );
    }
}
