// SPDX-License-Identifier: MPL-2.0
//! Viewer orchestrator.
//!
//! Owns the sub-components, exposes the lifecycle hooks the owning screen
//! calls, and applies every sub-component effect to the host in order.

use super::control_layout;
use super::gesture::{self, GestureInterpreter, Intent};
use super::overlay::{self, OverlayAnchor, OverlayAnchorController};
use super::presentation::{PresentationMode, PresentationModeSwitcher};
use super::Timings;
use crate::error::TransitionError;
use crate::geometry::{self, Point, Rectangle, Size};
use crate::media::{ImageHandle, MediaSource, SourceId};
use crate::playback::{self, MediaReadinessController, Notification, PlaybackState};
use crate::port::{Host, TimerToken, ZoomScale};
use std::time::Instant;

pub struct Viewer<H: Host> {
    host: H,
    timings: Timings,
    readiness: MediaReadinessController,
    presentation: PresentationModeSwitcher,
    overlay: OverlayAnchorController,
    gestures: GestureInterpreter,
    player_visible: bool,
    video_frame: Rectangle,
}

impl<H: Host> Viewer<H> {
    pub fn new(host: H, timings: Timings) -> Self {
        Self {
            host,
            readiness: MediaReadinessController::new(),
            presentation: PresentationModeSwitcher::new(),
            overlay: OverlayAnchorController::new(timings.overlay_fade, timings.auto_hide_delay),
            gestures: GestureInterpreter::new(timings.double_tap_window),
            player_visible: false,
            video_frame: geometry::ZERO_RECT,
            timings,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CONTENT
    // ═══════════════════════════════════════════════════════════════════════

    /// Shows a still image on the flat surface.
    pub fn display_image(&mut self, image: ImageHandle) {
        self.presentation.display_image(&mut self.host, image);
    }

    /// Builds a source for `uri` and attaches it, replacing any current one.
    pub fn attach_media(&mut self, uri: impl Into<String>, is_remote: bool) -> SourceId {
        self.attach_source(MediaSource::new(uri, is_remote))
    }

    /// Returns the id notifications for this attachment must carry. It is
    /// `source.id()` unless that id was attached before.
    pub fn attach_source(&mut self, source: MediaSource) -> SourceId {
        if self.presentation.mode() == PresentationMode::Zoomable {
            self.leave_zoomable();
        }
        let requested = source.id();
        self.set_player_visible(false);
        let effects = self.readiness.attach(source);
        self.apply_playback(effects);
        self.layout_controls();
        self.readiness.source_id().unwrap_or(requested)
    }

    /// Tears down the attached source. Nothing is left to auto-hide for, so
    /// a pending auto-hide is cancelled too.
    pub fn detach_media(&mut self) {
        let effects = self.readiness.detach();
        self.apply_playback(effects);

        let effects = self.overlay.cancel_auto_hide();
        self.apply_overlay(effects);
    }

    /// Entry point for the host adapter's notification bridge.
    pub fn handle_notification(&mut self, source: SourceId, notification: Notification) {
        let effects = self.readiness.handle_notification(source, notification);
        self.apply_playback(effects);
    }

    pub fn play(&mut self) {
        let effects = self.readiness.play();
        self.apply_playback(effects);
    }

    pub fn pause(&mut self) {
        let effects = self.readiness.pause();
        self.apply_playback(effects);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════

    /// The focus transition finished. Still content gets the zoomable
    /// surface when `zoom_enabled`; attached video stays on the flat surface
    /// and gets the auto-hide timer instead. Shows the overlay and resumes
    /// playback of a ready source.
    pub fn focus_did_end(&mut self, zoom_enabled: bool, now: Instant) {
        let has_media = self.readiness.has_source();
        tracing::debug!(zoom_enabled, has_media, "focus did end");
        if zoom_enabled && !has_media && self.presentation.mode() == PresentationMode::Flat {
            match self.presentation.enter_zoomable(&mut self.host) {
                Ok(_) => self.overlay.reattach(&mut self.host),
                Err(err) => tracing::warn!(%err, "zoomable surface not installed"),
            }
        }

        let effects = self.overlay.set_visible(true, true, now);
        self.apply_overlay(effects);
        self.set_player_visible(true);

        let effects = self.overlay.schedule_auto_hide(has_media);
        self.apply_overlay(effects);

        let effects = self.readiness.resume_if_ready();
        self.apply_playback(effects);
    }

    /// The defocus transition is about to start: restore the flat surface,
    /// pin the overlay out of the content hierarchy and pause playback.
    pub fn defocus_will_start(&mut self) {
        tracing::debug!("defocus will start");
        if self.presentation.mode() == PresentationMode::Zoomable {
            self.leave_zoomable();
        }
        self.overlay.pin(&mut self.host);

        let effects = self.gestures.cancel();
        self.apply_gestures(effects, None);

        let effects = self.readiness.pause();
        self.apply_playback(effects);
    }

    /// Tears down all subscriptions and timers.
    pub fn view_will_disappear(&mut self) {
        let effects = self.readiness.detach();
        self.apply_playback(effects);

        let effects = self.overlay.cancel_auto_hide();
        self.apply_overlay(effects);

        let effects = self.gestures.cancel();
        self.apply_gestures(effects, None);
    }

    /// Appearance transition start. Disappearing hides the overlay and the
    /// player surface at once.
    pub fn appearance_will_change(&mut self, appearing: bool) {
        if appearing {
            return;
        }
        let effects = self.overlay.hide_immediately();
        self.apply_overlay(effects);
        self.set_player_visible(false);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // GESTURES AND TIMERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Raw tap at `location`, in zoomable content coordinates.
    pub fn single_tap(&mut self, location: Point, now: Instant) {
        let effects = self
            .gestures
            .single_tap(location, self.zoom_scale(), self.viewport());
        self.apply_gestures(effects, Some(now));
    }

    /// Host-recognized double tap at `location`.
    pub fn double_tap(&mut self, location: Point, now: Instant) {
        let effects = self
            .gestures
            .double_tap(location, self.zoom_scale(), self.viewport());
        self.apply_gestures(effects, Some(now));
    }

    /// The zoomable surface changed scale: the overlay is shown exactly when
    /// the content is back at its minimum scale.
    pub fn zoom_did_change(&mut self, now: Instant) {
        if self.presentation.active_zoom_surface().is_none() {
            return;
        }
        let zoomed_in = self.zoom_scale().is_zoomed_in();
        let effects = self.overlay.set_visible(!zoomed_in, true, now);
        self.apply_overlay(effects);
    }

    /// A timer scheduled through `TimerScheduler` expired.
    pub fn timer_fired(&mut self, token: TimerToken, now: Instant) {
        self.host.timer_expired(token);

        let effects = self.overlay.auto_hide_fired(token, now);
        self.apply_overlay(effects);

        let effects = self.gestures.timer_fired(token, self.zoom_scale());
        self.apply_gestures(effects, Some(now));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        self.timings
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.readiness.state()
    }

    #[must_use]
    pub fn readiness(&self) -> &MediaReadinessController {
        &self.readiness
    }

    #[must_use]
    pub fn presentation_mode(&self) -> PresentationMode {
        self.presentation.mode()
    }

    #[must_use]
    pub fn overlay_anchor(&self) -> OverlayAnchor {
        self.overlay.anchor()
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    #[must_use]
    pub fn overlay_opacity(&self, now: Instant) -> f32 {
        self.overlay.opacity_at(now)
    }

    #[must_use]
    pub fn player_visible(&self) -> bool {
        self.player_visible
    }

    /// Last computed video rectangle inside the player bounds.
    #[must_use]
    pub fn video_frame(&self) -> Rectangle {
        self.video_frame
    }

    // ═══════════════════════════════════════════════════════════════════════
    // EFFECT ROUTING
    // ═══════════════════════════════════════════════════════════════════════

    fn apply_playback(&mut self, effects: Vec<playback::Effect>) {
        use playback::Effect;

        for effect in effects {
            match effect {
                Effect::CreateSource(source) => self.host.create_source(&source),
                Effect::ReleaseSource(id) => self.host.release_source(id),
                Effect::Subscribe { source, kind } => self.host.subscribe(source, kind),
                Effect::Unsubscribe { source, kind } => self.host.unsubscribe(source, kind),
                Effect::Play(id) => self.host.play(id),
                Effect::Pause(id) => self.host.pause(id),
                Effect::ShowLoadingIndicator => self.host.show_loading_indicator(),
                Effect::HideLoadingIndicator => self.host.hide_loading_indicator(),
                Effect::RecomputeContentFit(_) => self.layout_controls(),
            }
        }
    }

    fn apply_overlay(&mut self, effects: Vec<overlay::Effect>) {
        use overlay::Effect;

        for effect in effects {
            match effect {
                Effect::AnimateOpacity { to, duration } => {
                    self.host.animate_overlay_opacity(to, duration);
                }
                Effect::SetOpacity(value) => self.host.set_overlay_opacity(value),
                Effect::ScheduleTimer { token, delay } => self.host.schedule_timer(token, delay),
                Effect::CancelTimer(token) => self.host.cancel_timer(token),
            }
        }
    }

    /// `now` is `None` on teardown paths, which only ever cancel.
    fn apply_gestures(&mut self, effects: Vec<gesture::Effect>, now: Option<Instant>) {
        use gesture::Effect;

        for effect in effects {
            match effect {
                Effect::ScheduleTimer { token, delay } => self.host.schedule_timer(token, delay),
                Effect::CancelTimer(token) => self.host.cancel_timer(token),
                Effect::Dispatch(intent) => {
                    let now = now.unwrap_or_else(Instant::now);
                    self.dispatch(intent, now);
                }
            }
        }
    }

    fn dispatch(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::ToggleOverlay => {
                let zoomed_in = self.zoom_scale().is_zoomed_in();
                let effects = self.overlay.toggle_on_tap(zoomed_in, now);
                self.apply_overlay(effects);
            }
            Intent::Zoom(target) => {
                if let Some(surface) = self.presentation.active_zoom_surface() {
                    self.host
                        .animate_zoom(surface, target, self.timings.zoom_animation);
                }
            }
        }
    }

    fn zoom_scale(&self) -> ZoomScale {
        self.presentation
            .active_zoom_surface()
            .map_or(ZoomScale::FIXED, |surface| self.host.zoom_scale(surface))
    }

    fn viewport(&self) -> Size {
        self.host.container_bounds().size()
    }

    fn leave_zoomable(&mut self) {
        if let Err(err) = self.presentation.exit_zoomable(&mut self.host) {
            debug_assert!(err != TransitionError::NotZoomable, "mode and surface disagree");
            tracing::error!(%err, "zoomable surface not uninstalled");
        }
    }

    fn set_player_visible(&mut self, visible: bool) {
        if self.player_visible != visible {
            self.player_visible = visible;
            self.host.set_player_visible(visible);
        }
    }

    /// Recomputes the video rectangle and places the scrubber. Skipped while
    /// the overlay is pinned outside the content hierarchy.
    fn layout_controls(&mut self) {
        if self.overlay.anchor() == OverlayAnchor::Pinned {
            return;
        }
        self.video_frame = control_layout::video_frame(
            self.readiness.presentation_size(),
            self.host.player_bounds(),
        );
        let frame = control_layout::control_frame(
            self.host.container_bounds().width,
            self.host.control_height(),
            self.timings.control_margin,
            self.host.title_frame(),
            self.video_frame,
        );
        self.host.set_control_frame(frame);
    }
}

impl<H: Host> Drop for Viewer<H> {
    fn drop(&mut self) {
        self.view_will_disappear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use crate::playback::SourceStatus;
    use crate::port::{CoordinateSpace, OverlayHost, Surface, ZoomTarget};

    fn viewer() -> Viewer<RecordingHost> {
        let mut viewer = Viewer::new(RecordingHost::new(Size::new(320.0, 480.0)), Timings::default());
        viewer.display_image(ImageHandle::new("poster"));
        viewer
    }

    /// Fires every timer the host still holds, oldest first.
    fn fire_pending(viewer: &mut Viewer<RecordingHost>, now: Instant) {
        for (token, _) in viewer.host().pending_timers() {
            viewer.timer_fired(token, now);
        }
    }

    #[test]
    fn focus_installs_zoomable_surface_and_shows_overlay() {
        let mut viewer = viewer();
        let now = Instant::now();

        viewer.focus_did_end(true, now);

        assert_eq!(viewer.presentation_mode(), PresentationMode::Zoomable);
        assert_eq!(viewer.host().visible_surfaces().len(), 1);
        assert!(viewer.host().is_hidden(Surface::Flat));
        assert!(viewer.overlay_visible());
        assert!(viewer.player_visible());
    }

    #[test]
    fn focus_with_video_attached_keeps_flat_surface() {
        let mut viewer = viewer();
        viewer.attach_media("file:///clip.mp4", false);

        viewer.focus_did_end(true, Instant::now());

        assert_eq!(viewer.presentation_mode(), PresentationMode::Flat);
        assert_eq!(viewer.host().visible_surfaces(), vec![Surface::Flat]);
        assert_eq!(
            viewer.host().count_calls(|c| matches!(c, HostCall::CreateZoomable(_))),
            0
        );
        assert!(viewer.player_visible());
        assert_eq!(viewer.host().pending_timers().len(), 1);
    }

    #[test]
    fn attaching_video_leaves_zoomable_surface() {
        let mut viewer = viewer();
        viewer.focus_did_end(true, Instant::now());
        assert_eq!(viewer.presentation_mode(), PresentationMode::Zoomable);

        viewer.attach_media("file:///clip.mp4", false);

        assert_eq!(viewer.presentation_mode(), PresentationMode::Flat);
        assert_eq!(viewer.host().visible_surfaces(), vec![Surface::Flat]);
        assert!(viewer.host().violations().is_empty());
    }

    #[test]
    fn focus_without_zoom_stays_flat() {
        let mut viewer = viewer();
        viewer.focus_did_end(false, Instant::now());

        assert_eq!(viewer.presentation_mode(), PresentationMode::Flat);
        assert_eq!(viewer.host().visible_surfaces(), vec![Surface::Flat]);
    }

    #[test]
    fn single_tap_toggles_overlay_once_window_closes() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.focus_did_end(true, now);

        viewer.single_tap(Point::new(50.0, 50.0), now);
        assert!(viewer.overlay_visible());

        let window_closed = now + viewer.timings().double_tap_window;
        fire_pending(&mut viewer, window_closed);
        assert!(!viewer.overlay_visible());
    }

    #[test]
    fn double_tap_zooms_in_then_out_and_tracks_overlay() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.focus_did_end(true, now);

        viewer.double_tap(Point::new(100.0, 50.0), now);
        viewer.zoom_did_change(now);

        assert_eq!(
            viewer.host().count_calls(|c| matches!(c, HostCall::AnimateZoom(..))),
            1
        );
        assert!(!viewer.overlay_visible());

        viewer.double_tap(Point::new(100.0, 50.0), now);
        viewer.zoom_did_change(now);

        assert!(matches!(
            viewer.host().calls().iter().rev().find(|c| matches!(c, HostCall::AnimateZoom(..))),
            Some(HostCall::AnimateZoom(_, ZoomTarget::Minimum { .. }, _))
        ));
        assert!(viewer.overlay_visible());
    }

    #[test]
    fn single_tap_while_zoomed_leaves_overlay_alone() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.focus_did_end(true, now);
        viewer.double_tap(Point::new(100.0, 50.0), now);
        viewer.zoom_did_change(now);

        viewer.single_tap(Point::new(10.0, 10.0), now);
        fire_pending(&mut viewer, now);

        assert!(!viewer.overlay_visible());
    }

    #[test]
    fn defocus_restores_flat_surface_where_zoomed_content_was() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.focus_did_end(true, now);
        viewer.double_tap(Point::new(100.0, 50.0), now);

        viewer.defocus_will_start();

        assert_eq!(viewer.presentation_mode(), PresentationMode::Flat);
        assert_eq!(viewer.host().visible_surfaces(), vec![Surface::Flat]);
        let frame = viewer.host().flat_frame();
        assert_eq!((frame.x, frame.y), (-140.0, 90.0));
        assert_eq!((frame.width, frame.height), (960.0, 1440.0));
        assert_eq!(viewer.overlay_anchor(), OverlayAnchor::Pinned);
        assert_eq!(viewer.host().overlay_parent(), CoordinateSpace::Root);
    }

    #[test]
    fn refocus_reinstalls_fresh_surface_and_reattaches_overlay() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.focus_did_end(true, now);
        viewer.double_tap(Point::new(100.0, 50.0), now);
        viewer.defocus_will_start();

        viewer.focus_did_end(true, now);

        assert_eq!(viewer.overlay_anchor(), OverlayAnchor::Attached);
        assert_eq!(
            viewer.host().count_calls(|c| matches!(c, HostCall::DestroyZoomable(_))),
            1
        );
        assert!(!viewer.zoom_scale().is_zoomed_in());
    }

    #[test]
    fn presentation_size_lays_out_scrubber_above_video_bottom() {
        let mut viewer = viewer();
        let id = viewer.attach_media("file:///clip.mp4", false);
        assert_eq!(viewer.host().control_frame().map(|f| f.y), Some(395.0));

        viewer.handle_notification(
            id,
            Notification::PresentationSizeChanged(Size::new(1920.0, 1080.0)),
        );

        assert_eq!(
            viewer.video_frame(),
            Rectangle::new(Point::new(0.0, 150.0), Size::new(320.0, 180.0))
        );
        assert_eq!(viewer.host().control_frame().map(|f| f.y), Some(285.0));
    }

    #[test]
    fn scrubber_spans_container_not_overlay() {
        let mut viewer = viewer();
        viewer
            .host_mut()
            .place_overlay(Rectangle::new(Point::new(40.0, 0.0), Size::new(200.0, 480.0)));

        viewer.attach_media("file:///clip.mp4", false);

        let margin = viewer.timings().control_margin;
        let frame = viewer.host().control_frame().expect("control laid out");
        assert_eq!(frame.x, margin);
        assert_eq!(frame.width, 320.0 - margin * 2.0);
    }

    #[test]
    fn layout_is_skipped_while_pinned() {
        let mut viewer = viewer();
        let id = viewer.attach_media("file:///clip.mp4", false);
        viewer.defocus_will_start();
        let before = viewer
            .host()
            .count_calls(|c| matches!(c, HostCall::SetControlFrame(_)));

        viewer.handle_notification(
            id,
            Notification::PresentationSizeChanged(Size::new(1920.0, 1080.0)),
        );

        assert_eq!(
            viewer
                .host()
                .count_calls(|c| matches!(c, HostCall::SetControlFrame(_))),
            before
        );
    }

    #[test]
    fn focus_resumes_ready_source() {
        let mut viewer = viewer();
        let id = viewer.attach_media("file:///clip.mp4", false);
        viewer.handle_notification(id, Notification::StatusChanged(SourceStatus::ReadyToPlay));
        viewer.defocus_will_start();
        assert!(!viewer.host().is_playing(id));

        viewer.focus_did_end(false, Instant::now());

        assert!(viewer.host().is_playing(id));
        assert_eq!(viewer.playback_state(), PlaybackState::ReadyPlaying);
    }

    #[test]
    fn attach_hides_player_until_focus() {
        let mut viewer = viewer();
        viewer.focus_did_end(false, Instant::now());
        assert!(viewer.host().player_visible());

        viewer.attach_media("https://example.com/clip.m3u8", true);

        assert!(!viewer.host().player_visible());
        assert!(viewer.host().indicator_visible());
    }

    #[test]
    fn disappearing_hides_overlay_and_player_at_once() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.focus_did_end(false, now);

        viewer.appearance_will_change(false);

        assert_eq!(viewer.overlay_opacity(now), 0.0);
        assert_eq!(viewer.host().overlay_target_opacity(), 0.0);
        assert!(!viewer.host().player_visible());
    }

    #[test]
    fn detach_cancels_pending_auto_hide() {
        let mut viewer = viewer();
        let now = Instant::now();
        viewer.attach_media("https://example.com/clip.m3u8", true);
        viewer.focus_did_end(false, now);
        let token = match viewer.host().pending_timers().as_slice() {
            [(token, _)] => *token,
            other => panic!("expected one auto-hide timer, got {other:?}"),
        };

        viewer.detach_media();

        assert!(viewer.host().pending_timers().is_empty());
        assert_eq!(
            viewer.host().count_calls(|c| *c == HostCall::CancelTimer(token)),
            1
        );
        viewer.timer_fired(token, now + viewer.timings().auto_hide_delay);
        assert!(viewer.overlay_visible());
        assert!(viewer.host().violations().is_empty());
    }

    #[test]
    fn failed_source_stays_paused_through_focus() {
        let mut viewer = viewer();
        let id = viewer.attach_media("https://example.com/clip.m3u8", true);
        viewer.handle_notification(id, Notification::StatusChanged(SourceStatus::Failed));

        viewer.focus_did_end(false, Instant::now());

        assert_eq!(viewer.host().count_calls(|c| matches!(c, HostCall::Play(_))), 0);
        assert_eq!(viewer.playback_state(), PlaybackState::Failed);
        assert!(!viewer.host().indicator_visible());
    }

    #[test]
    fn reattaching_cloned_source_ignores_old_notifications() {
        let mut viewer = viewer();
        let source = MediaSource::new("https://example.com/clip.m3u8", true);
        let first = viewer.attach_source(source.clone());
        viewer.detach_media();

        let second = viewer.attach_source(source.clone());
        viewer.handle_notification(first, Notification::StatusChanged(SourceStatus::ReadyToPlay));

        assert_ne!(first, second);
        assert_eq!(viewer.playback_state(), PlaybackState::Loading);
        assert_eq!(viewer.host().count_calls(|c| matches!(c, HostCall::Play(_))), 0);
        assert_eq!(viewer.host().live_sources(), vec![second]);
        assert!(viewer.host().violations().is_empty());

        viewer.handle_notification(second, Notification::StatusChanged(SourceStatus::ReadyToPlay));
        assert_eq!(viewer.playback_state(), PlaybackState::ReadyPlaying);
    }

    #[test]
    fn view_will_disappear_releases_everything() {
        let mut viewer = viewer();
        let id = viewer.attach_media("file:///clip.mp4", false);
        viewer.focus_did_end(true, Instant::now());

        viewer.view_will_disappear();

        assert!(viewer.host().subscriptions().is_empty());
        assert!(viewer.host().live_sources().is_empty());
        assert!(viewer.host().pending_timers().is_empty());
        assert!(!viewer.host().is_playing(id));
        assert!(viewer.host().violations().is_empty());
    }
}
