// SPDX-License-Identifier: MPL-2.0
//! Rendering surface port: the flat image view, the zoomable surface and
//! coordinate conversion between the viewer's spaces.

use crate::geometry::{Rectangle, Transform};
use crate::media::ImageHandle;
use std::fmt;
use std::time::Duration;

/// Host-assigned handle of a zoomable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// One of the two mutually exclusive image surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Flat,
    Zoomable(SurfaceHandle),
}

/// Coordinate spaces the viewer converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    /// The outer, untransformed viewer container.
    Root,
    /// The content container hosting the image surfaces. It may carry a
    /// transform during focus transitions.
    Content,
    /// Scrollable content coordinates of a zoomable surface.
    ZoomSurface(SurfaceHandle),
}

/// Zoom scale range reported by a zoomable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale {
    pub current: f32,
    pub minimum: f32,
    pub maximum: f32,
}

impl ZoomScale {
    /// Scale of content that cannot zoom.
    pub const FIXED: Self = Self {
        current: 1.0,
        minimum: 1.0,
        maximum: 1.0,
    };

    /// True when the content is zoomed in past its minimum scale.
    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.current > self.minimum
    }
}

/// Where a zoom animation should end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomTarget {
    /// Zoom to `scale` and scroll `visible` (zoomed content coordinates)
    /// into view.
    Rect { scale: f32, visible: Rectangle },
    /// Return to the minimum scale.
    Minimum { scale: f32 },
}

pub trait RenderSurface {
    /// Bounds of the content container, in its own coordinates.
    fn container_bounds(&self) -> Rectangle;

    /// Bounds of the flat image surface, which also hosts the video player.
    fn player_bounds(&self) -> Rectangle;

    /// Creates a zoomable surface inside the content container.
    fn create_zoomable_surface(&mut self, frame: Rectangle) -> SurfaceHandle;

    fn destroy_zoomable_surface(&mut self, surface: SurfaceHandle);

    fn set_image(&mut self, surface: Surface, image: &ImageHandle);

    fn set_hidden(&mut self, surface: Surface, hidden: bool);

    /// Frame of the flat surface in content-container coordinates.
    fn set_flat_frame(&mut self, frame: Rectangle);

    /// Frame of the zoomed image inside the zoomable surface, in the
    /// surface's own (scrollable) coordinates.
    fn current_content_rect(&self, surface: SurfaceHandle) -> Rectangle;

    fn zoom_scale(&self, surface: SurfaceHandle) -> ZoomScale;

    /// Animates to `target`. The animation must start from the current
    /// scale and offset, so an in-flight zoom is redirected, not queued.
    fn animate_zoom(&mut self, surface: SurfaceHandle, target: ZoomTarget, duration: Duration);

    fn convert(&self, rect: Rectangle, from: CoordinateSpace, to: CoordinateSpace) -> Rectangle;

    /// Transform the given space applies relative to its parent.
    fn transform(&self, space: CoordinateSpace) -> Transform;

    fn set_player_visible(&mut self, visible: bool);
}
