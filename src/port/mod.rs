// SPDX-License-Identifier: MPL-2.0
//! Port definitions for the host collaborators.
//!
//! The viewer core is host-agnostic: it drives rendering, playback, the
//! loading indicator and timers only through these traits. A host adapter
//! (a GUI toolkit binding, or [`crate::host::RecordingHost`] in tests)
//! implements them and feeds notifications and gestures back into
//! [`crate::viewer::Viewer`].
//!
//! # Design Notes
//!
//! - Methods are synchronous and called on the single UI thread
//! - Queries (`convert`, `current_content_rect`, ...) must reflect the
//!   host's state at the time of the call, including prior mutations
//! - Hosts never call back into the viewer from inside a port method

pub mod feedback;
pub mod overlay;
pub mod player;
pub mod surface;

pub use feedback::{LoadingIndicator, TimerScheduler, TimerToken};
pub use overlay::OverlayHost;
pub use player::PlayerBackend;
pub use surface::{CoordinateSpace, RenderSurface, Surface, SurfaceHandle, ZoomScale, ZoomTarget};

/// Everything the viewer needs from its host.
pub trait Host: PlayerBackend + RenderSurface + OverlayHost + LoadingIndicator + TimerScheduler {}

impl<T> Host for T where T: PlayerBackend + RenderSurface + OverlayHost + LoadingIndicator + TimerScheduler
{}
