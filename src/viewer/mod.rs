// SPDX-License-Identifier: MPL-2.0
//! The focusable media viewer.
//!
//! ## Architecture
//!
//! ```text
//! component.rs (orchestrator, lifecycle hooks)
//!     ├── playback::MediaReadinessController - source + readiness
//!     ├── presentation   - flat/zoomable surfaces
//!     ├── overlay        - accessory overlay visibility + anchoring
//!     ├── gesture        - tap/double-tap interpretation
//!     └── control_layout - scrubber placement
//! ```
//!
//! Sub-components never touch each other's state; the orchestrator routes
//! their effects to the host ports.

pub mod component;
pub mod control_layout;
pub mod gesture;
pub mod overlay;
pub mod presentation;

pub use component::Viewer;
pub use gesture::{GestureInterpreter, Intent};
pub use overlay::{OverlayAnchor, OverlayAnchorController};
pub use presentation::{PresentationMode, PresentationModeSwitcher};

use crate::config::{self, Config};
use std::time::Duration;

/// Durations and layout constants the viewer runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub auto_hide_delay: Duration,
    pub overlay_fade: Duration,
    pub zoom_animation: Duration,
    pub double_tap_window: Duration,
    pub control_margin: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            auto_hide_delay: Duration::from_millis(config::DEFAULT_AUTO_HIDE_DELAY_MS),
            overlay_fade: Duration::from_millis(config::DEFAULT_OVERLAY_FADE_MS),
            zoom_animation: Duration::from_millis(config::DEFAULT_ZOOM_ANIMATION_MS),
            double_tap_window: Duration::from_millis(config::DEFAULT_DOUBLE_TAP_WINDOW_MS),
            control_margin: config::DEFAULT_CONTROL_MARGIN,
        }
    }
}

impl From<&Config> for Timings {
    fn from(config: &Config) -> Self {
        Self {
            auto_hide_delay: config.auto_hide_delay(),
            overlay_fade: config.overlay_fade(),
            zoom_animation: config.zoom_animation(),
            double_tap_window: config.double_tap_window(),
            control_margin: config.control_margin(),
        }
    }
}
