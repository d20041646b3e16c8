// SPDX-License-Identifier: MPL-2.0
//! In-memory host that records every port call and models enough geometry
//! to answer the viewer's queries.
//!
//! Used by the test suite and the demo binary. It also checks the
//! observation protocol and collects violations instead of panicking, so
//! tests can assert on them.

use super::TokioTimers;
use crate::geometry::{self, Point, Rectangle, Size, Transform, Vector};
use crate::media::{ImageHandle, MediaSource, SourceId};
use crate::playback::NotificationKind;
use crate::port::{
    CoordinateSpace, LoadingIndicator, OverlayHost, PlayerBackend, RenderSurface, Surface,
    SurfaceHandle, TimerScheduler, TimerToken, ZoomScale, ZoomTarget,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

const TITLE_HEIGHT: f32 = 30.0;
const CONTROL_HEIGHT: f32 = 40.0;
const MAXIMUM_ZOOM: f32 = 3.0;

/// One recorded port call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateSource(SourceId),
    ReleaseSource(SourceId),
    Subscribe(SourceId, NotificationKind),
    Unsubscribe(SourceId, NotificationKind),
    Play(SourceId),
    Pause(SourceId),
    CreateZoomable(SurfaceHandle),
    DestroyZoomable(SurfaceHandle),
    SetImage(Surface, ImageHandle),
    SetHidden(Surface, bool),
    SetFlatFrame(Rectangle),
    AnimateZoom(SurfaceHandle, ZoomTarget, Duration),
    SetPlayerVisible(bool),
    ReparentOverlay(CoordinateSpace, Rectangle, Transform),
    AnimateOverlayOpacity(f32, Duration),
    SetOverlayOpacity(f32),
    SetControlFrame(Rectangle),
    ShowLoadingIndicator,
    HideLoadingIndicator,
    ScheduleTimer(TimerToken, Duration),
    CancelTimer(TimerToken),
}

#[derive(Debug, Clone)]
struct ZoomSurfaceModel {
    frame: Rectangle,
    image: Option<ImageHandle>,
    scale: f32,
    offset: Vector,
    hidden: bool,
}

impl ZoomSurfaceModel {
    fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            image: None,
            scale: 1.0,
            offset: Vector::new(0.0, 0.0),
            hidden: true,
        }
    }
}

#[derive(Debug, Clone)]
struct OverlayModel {
    parent: CoordinateSpace,
    frame: Rectangle,
    transform: Transform,
    opacity: f32,
    control_frame: Option<Rectangle>,
}

#[derive(Debug)]
pub struct RecordingHost {
    container: Size,
    content_transform: Transform,
    flat_frame: Rectangle,
    flat_image: Option<ImageHandle>,
    flat_hidden: bool,
    next_surface: u64,
    surfaces: HashMap<SurfaceHandle, ZoomSurfaceModel>,
    overlay: OverlayModel,
    sources: HashMap<SourceId, MediaSource>,
    subscriptions: BTreeSet<(SourceId, NotificationKind)>,
    playing: HashSet<SourceId>,
    player_visible: bool,
    indicator_visible: bool,
    timers: HashMap<TimerToken, Duration>,
    tokio_timers: Option<TokioTimers>,
    calls: Vec<HostCall>,
    violations: Vec<String>,
}

impl RecordingHost {
    /// Host with a content container of `container` size at the origin.
    #[must_use]
    pub fn new(container: Size) -> Self {
        let bounds = Rectangle::new(Point::ORIGIN, container);
        Self {
            container,
            content_transform: Transform::IDENTITY,
            flat_frame: bounds,
            flat_image: None,
            flat_hidden: false,
            next_surface: 1,
            surfaces: HashMap::new(),
            overlay: OverlayModel {
                parent: CoordinateSpace::Content,
                frame: bounds,
                transform: Transform::IDENTITY,
                opacity: 0.0,
                control_frame: None,
            },
            sources: HashMap::new(),
            subscriptions: BTreeSet::new(),
            playing: HashSet::new(),
            player_visible: false,
            indicator_visible: false,
            timers: HashMap::new(),
            tokio_timers: None,
            calls: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Forwards timer scheduling to real tokio timers as well.
    #[must_use]
    pub fn with_timers(mut self, timers: TokioTimers) -> Self {
        self.tokio_timers = Some(timers);
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SIMULATION
    // ═══════════════════════════════════════════════════════════════════════

    /// Transform the content container carries, e.g. mid focus transition.
    pub fn set_content_transform(&mut self, transform: Transform) {
        self.content_transform = transform;
    }

    /// Places the overlay under the content container without recording a
    /// reparent.
    pub fn place_overlay(&mut self, frame: Rectangle) {
        self.overlay.parent = CoordinateSpace::Content;
        self.overlay.frame = frame;
        self.overlay.transform = Transform::IDENTITY;
    }

    /// Simulates a user pinch or pan on a zoomable surface.
    pub fn zoom_to(&mut self, surface: SurfaceHandle, scale: f32, offset: Vector) {
        match self.surfaces.get_mut(&surface) {
            Some(model) => {
                model.scale = scale;
                model.offset = offset;
            }
            None => self
                .violations
                .push(format!("zoom on unknown surface {surface}")),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INSPECTION
    // ═══════════════════════════════════════════════════════════════════════

    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Protocol violations observed so far; empty for a well-behaved viewer.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    #[must_use]
    pub fn is_hidden(&self, surface: Surface) -> bool {
        match surface {
            Surface::Flat => self.flat_hidden,
            Surface::Zoomable(handle) => self.surfaces.get(&handle).is_none_or(|s| s.hidden),
        }
    }

    /// Surfaces currently shown. Exactly one for a consistent viewer.
    #[must_use]
    pub fn visible_surfaces(&self) -> Vec<Surface> {
        let mut visible: Vec<Surface> = self
            .surfaces
            .iter()
            .filter(|(_, model)| !model.hidden)
            .map(|(handle, _)| Surface::Zoomable(*handle))
            .collect();
        if !self.flat_hidden {
            visible.push(Surface::Flat);
        }
        visible
    }

    #[must_use]
    pub fn flat_frame(&self) -> Rectangle {
        self.flat_frame
    }

    #[must_use]
    pub fn flat_image(&self) -> Option<&ImageHandle> {
        self.flat_image.as_ref()
    }

    #[must_use]
    pub fn surface_image(&self, surface: SurfaceHandle) -> Option<&ImageHandle> {
        self.surfaces.get(&surface).and_then(|s| s.image.as_ref())
    }

    #[must_use]
    pub fn overlay_transform(&self) -> Transform {
        self.overlay.transform
    }

    /// Last opacity the overlay was set or animated to.
    #[must_use]
    pub fn overlay_target_opacity(&self) -> f32 {
        self.overlay.opacity
    }

    #[must_use]
    pub fn control_frame(&self) -> Option<Rectangle> {
        self.overlay.control_frame
    }

    #[must_use]
    pub fn reparent_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::ReparentOverlay(..)))
            .count()
    }

    #[must_use]
    pub fn live_sources(&self) -> Vec<SourceId> {
        let mut ids: Vec<SourceId> = self.sources.keys().copied().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn subscriptions(&self) -> Vec<(SourceId, NotificationKind)> {
        self.subscriptions.iter().copied().collect()
    }

    #[must_use]
    pub fn is_playing(&self, source: SourceId) -> bool {
        self.playing.contains(&source)
    }

    #[must_use]
    pub fn player_visible(&self) -> bool {
        self.player_visible
    }

    #[must_use]
    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    /// Timers scheduled and neither cancelled nor fired.
    #[must_use]
    pub fn pending_timers(&self) -> Vec<(TimerToken, Duration)> {
        let mut timers: Vec<_> = self.timers.iter().map(|(t, d)| (*t, *d)).collect();
        timers.sort();
        timers
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // GEOMETRY MODEL
    // ═══════════════════════════════════════════════════════════════════════

    fn container_rect(&self) -> Rectangle {
        Rectangle::new(Point::ORIGIN, self.container)
    }

    /// Maps `rect` from `space` into content-container coordinates.
    fn to_content(&self, rect: Rectangle, space: CoordinateSpace) -> Rectangle {
        match space {
            CoordinateSpace::Content => rect,
            CoordinateSpace::Root => {
                let t = self.content_transform;
                Rectangle {
                    x: (rect.x - t.translation.x) / t.scale,
                    y: (rect.y - t.translation.y) / t.scale,
                    width: rect.width / t.scale,
                    height: rect.height / t.scale,
                }
            }
            CoordinateSpace::ZoomSurface(handle) => {
                let (origin, offset) = self.surface_origin(handle);
                Rectangle {
                    x: rect.x - offset.x + origin.x,
                    y: rect.y - offset.y + origin.y,
                    ..rect
                }
            }
        }
    }

    /// Maps `rect` from content-container coordinates into `space`.
    fn from_content(&self, rect: Rectangle, space: CoordinateSpace) -> Rectangle {
        match space {
            CoordinateSpace::Content => rect,
            CoordinateSpace::Root => {
                let t = self.content_transform;
                Rectangle {
                    x: rect.x * t.scale + t.translation.x,
                    y: rect.y * t.scale + t.translation.y,
                    width: rect.width * t.scale,
                    height: rect.height * t.scale,
                }
            }
            CoordinateSpace::ZoomSurface(handle) => {
                let (origin, offset) = self.surface_origin(handle);
                Rectangle {
                    x: rect.x + offset.x - origin.x,
                    y: rect.y + offset.y - origin.y,
                    ..rect
                }
            }
        }
    }

    fn surface_origin(&self, handle: SurfaceHandle) -> (Point, Vector) {
        self.surfaces
            .get(&handle)
            .map_or((Point::ORIGIN, Vector::new(0.0, 0.0)), |s| {
                (Point::new(s.frame.x, s.frame.y), s.offset)
            })
    }

    fn violation(&mut self, message: String) {
        tracing::warn!(%message, "host protocol violation");
        self.violations.push(message);
    }
}

impl PlayerBackend for RecordingHost {
    fn create_source(&mut self, source: &MediaSource) {
        self.calls.push(HostCall::CreateSource(source.id()));
        if self.sources.insert(source.id(), source.clone()).is_some() {
            self.violation(format!("{} created twice", source.id()));
        }
    }

    fn release_source(&mut self, source: SourceId) {
        self.calls.push(HostCall::ReleaseSource(source));
        if self.subscriptions.iter().any(|(id, _)| *id == source) {
            self.violation(format!("{source} released with live observers"));
        }
        if self.sources.remove(&source).is_none() {
            self.violation(format!("{source} released but never created"));
        }
        self.playing.remove(&source);
    }

    fn subscribe(&mut self, source: SourceId, kind: NotificationKind) {
        self.calls.push(HostCall::Subscribe(source, kind));
        if !self.sources.contains_key(&source) {
            self.violation(format!("subscribe {kind} on unknown {source}"));
        }
        if !self.subscriptions.insert((source, kind)) {
            self.violation(format!("{kind} subscribed twice on {source}"));
        }
    }

    fn unsubscribe(&mut self, source: SourceId, kind: NotificationKind) {
        self.calls.push(HostCall::Unsubscribe(source, kind));
        if !self.subscriptions.remove(&(source, kind)) {
            self.violation(format!("{kind} unsubscribed without subscription on {source}"));
        }
    }

    fn play(&mut self, source: SourceId) {
        self.calls.push(HostCall::Play(source));
        if self.sources.contains_key(&source) {
            self.playing.insert(source);
        } else {
            self.violation(format!("play on unknown {source}"));
        }
    }

    fn pause(&mut self, source: SourceId) {
        self.calls.push(HostCall::Pause(source));
        self.playing.remove(&source);
    }
}

impl RenderSurface for RecordingHost {
    fn container_bounds(&self) -> Rectangle {
        self.container_rect()
    }

    fn player_bounds(&self) -> Rectangle {
        self.flat_frame
    }

    fn create_zoomable_surface(&mut self, frame: Rectangle) -> SurfaceHandle {
        let handle = SurfaceHandle(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(handle, ZoomSurfaceModel::new(frame));
        self.calls.push(HostCall::CreateZoomable(handle));
        handle
    }

    fn destroy_zoomable_surface(&mut self, surface: SurfaceHandle) {
        self.calls.push(HostCall::DestroyZoomable(surface));
        if self.surfaces.remove(&surface).is_none() {
            self.violation(format!("destroy of unknown {surface}"));
        }
    }

    fn set_image(&mut self, surface: Surface, image: &ImageHandle) {
        self.calls.push(HostCall::SetImage(surface, image.clone()));
        match surface {
            Surface::Flat => self.flat_image = Some(image.clone()),
            Surface::Zoomable(handle) => match self.surfaces.get_mut(&handle) {
                Some(model) => model.image = Some(image.clone()),
                None => self.violation(format!("image set on unknown {handle}")),
            },
        }
    }

    fn set_hidden(&mut self, surface: Surface, hidden: bool) {
        self.calls.push(HostCall::SetHidden(surface, hidden));
        match surface {
            Surface::Flat => self.flat_hidden = hidden,
            Surface::Zoomable(handle) => match self.surfaces.get_mut(&handle) {
                Some(model) => model.hidden = hidden,
                None => self.violation(format!("visibility set on unknown {handle}")),
            },
        }
    }

    fn set_flat_frame(&mut self, frame: Rectangle) {
        self.calls.push(HostCall::SetFlatFrame(frame));
        self.flat_frame = frame;
    }

    fn current_content_rect(&self, surface: SurfaceHandle) -> Rectangle {
        self.surfaces
            .get(&surface)
            .map_or(geometry::ZERO_RECT, |model| Rectangle {
                x: 0.0,
                y: 0.0,
                width: model.frame.width * model.scale,
                height: model.frame.height * model.scale,
            })
    }

    fn zoom_scale(&self, surface: SurfaceHandle) -> ZoomScale {
        self.surfaces
            .get(&surface)
            .map_or(ZoomScale::FIXED, |model| ZoomScale {
                current: model.scale,
                minimum: 1.0,
                maximum: MAXIMUM_ZOOM,
            })
    }

    /// Completes the animation at once.
    fn animate_zoom(&mut self, surface: SurfaceHandle, target: ZoomTarget, duration: Duration) {
        self.calls
            .push(HostCall::AnimateZoom(surface, target, duration));
        let Some(model) = self.surfaces.get_mut(&surface) else {
            self.violation(format!("zoom animation on unknown {surface}"));
            return;
        };
        match target {
            ZoomTarget::Rect { scale, visible } => {
                model.scale = scale;
                model.offset = Vector::new(visible.x, visible.y);
            }
            ZoomTarget::Minimum { scale } => {
                model.scale = scale;
                model.offset = Vector::new(0.0, 0.0);
            }
        }
    }

    fn convert(&self, rect: Rectangle, from: CoordinateSpace, to: CoordinateSpace) -> Rectangle {
        if from == to {
            return rect;
        }
        self.from_content(self.to_content(rect, from), to)
    }

    fn transform(&self, space: CoordinateSpace) -> Transform {
        match space {
            CoordinateSpace::Content => self.content_transform,
            CoordinateSpace::Root | CoordinateSpace::ZoomSurface(_) => Transform::IDENTITY,
        }
    }

    fn set_player_visible(&mut self, visible: bool) {
        self.calls.push(HostCall::SetPlayerVisible(visible));
        self.player_visible = visible;
    }
}

impl OverlayHost for RecordingHost {
    fn overlay_parent(&self) -> CoordinateSpace {
        self.overlay.parent
    }

    fn overlay_frame(&self) -> Rectangle {
        self.overlay.frame
    }

    fn reparent_overlay(&mut self, parent: CoordinateSpace, frame: Rectangle, transform: Transform) {
        self.calls
            .push(HostCall::ReparentOverlay(parent, frame, transform));
        self.overlay.parent = parent;
        self.overlay.frame = frame;
        self.overlay.transform = transform;
    }

    fn animate_overlay_opacity(&mut self, to: f32, duration: Duration) {
        self.calls
            .push(HostCall::AnimateOverlayOpacity(to, duration));
        self.overlay.opacity = to;
    }

    fn set_overlay_opacity(&mut self, value: f32) {
        self.calls.push(HostCall::SetOverlayOpacity(value));
        self.overlay.opacity = value;
    }

    fn title_frame(&self) -> Rectangle {
        let width = self.overlay.frame.width;
        Rectangle {
            x: 5.0,
            y: self.overlay.frame.height - TITLE_HEIGHT - 10.0,
            width: (width - 10.0).max(0.0),
            height: TITLE_HEIGHT,
        }
    }

    fn control_height(&self) -> f32 {
        CONTROL_HEIGHT
    }

    fn set_control_frame(&mut self, frame: Rectangle) {
        self.calls.push(HostCall::SetControlFrame(frame));
        self.overlay.control_frame = Some(frame);
    }
}

impl LoadingIndicator for RecordingHost {
    fn show_loading_indicator(&mut self) {
        self.calls.push(HostCall::ShowLoadingIndicator);
        self.indicator_visible = true;
    }

    fn hide_loading_indicator(&mut self) {
        self.calls.push(HostCall::HideLoadingIndicator);
        self.indicator_visible = false;
    }
}

impl TimerScheduler for RecordingHost {
    fn schedule_timer(&mut self, token: TimerToken, delay: Duration) {
        self.calls.push(HostCall::ScheduleTimer(token, delay));
        if self.timers.insert(token, delay).is_some() {
            self.violation(format!("{token} scheduled twice"));
        }
        if let Some(timers) = self.tokio_timers.as_mut() {
            timers.schedule_timer(token, delay);
        }
    }

    fn cancel_timer(&mut self, token: TimerToken) {
        self.calls.push(HostCall::CancelTimer(token));
        self.timers.remove(&token);
        if let Some(timers) = self.tokio_timers.as_mut() {
            timers.cancel_timer(token);
        }
    }

    fn timer_expired(&mut self, token: TimerToken) {
        self.timers.remove(&token);
        if let Some(timers) = self.tokio_timers.as_mut() {
            timers.timer_expired(token);
        }
    }
}
