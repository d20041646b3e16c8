// SPDX-License-Identifier: MPL-2.0
//! Accessory overlay port (title and scrubber container).

use super::surface::CoordinateSpace;
use crate::geometry::{Rectangle, Transform};
use std::time::Duration;

pub trait OverlayHost {
    /// Space of the overlay's current parent.
    fn overlay_parent(&self) -> CoordinateSpace;

    /// Overlay frame in its parent's coordinates.
    fn overlay_frame(&self) -> Rectangle;

    /// Moves the overlay under `parent` and applies `frame` (in the new
    /// parent's coordinates) and `transform` in one step.
    fn reparent_overlay(&mut self, parent: CoordinateSpace, frame: Rectangle, transform: Transform);

    /// Animates opacity from its current presented value to `to`.
    fn animate_overlay_opacity(&mut self, to: f32, duration: Duration);

    fn set_overlay_opacity(&mut self, value: f32);

    /// Title label frame, in overlay coordinates.
    fn title_frame(&self) -> Rectangle;

    /// Preferred height of the scrubber control.
    fn control_height(&self) -> f32;

    /// Places the scrubber control, in overlay coordinates.
    fn set_control_frame(&mut self, frame: Rectangle);
}
