// SPDX-License-Identifier: MPL-2.0
//! Host-side plumbing: a recording port implementation, tokio-backed
//! timers and the event loop that feeds a [`Viewer`].
//!
//! Every host event is handled on the task running [`run`], which keeps
//! the viewer single-threaded; timers and notification bridges only ever
//! send [`HostEvent`]s into its channel.

mod recording;
mod timers;

pub use recording::{HostCall, RecordingHost};
pub use timers::TokioTimers;

use crate::geometry::Point;
use crate::media::{ImageHandle, MediaSource, SourceId};
use crate::playback::Notification;
use crate::port::{Host, TimerToken};
use crate::viewer::Viewer;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Everything a host can tell the viewer.
#[derive(Debug, Clone)]
pub enum HostEvent {
    DisplayImage(ImageHandle),
    AttachMedia(MediaSource),
    DetachMedia,
    Notification {
        source: SourceId,
        notification: Notification,
    },
    Play,
    Pause,
    FocusDidEnd {
        zoom_enabled: bool,
    },
    DefocusWillStart,
    AppearanceWillChange {
        appearing: bool,
    },
    ViewWillDisappear,
    SingleTap(Point),
    DoubleTap(Point),
    ZoomDidChange,
    TimerFired(TimerToken),
    /// Stops [`run`] and hands the viewer back.
    Shutdown,
}

/// Applies host events to `viewer` until [`HostEvent::Shutdown`] arrives or
/// every sender is gone.
///
/// Event times come from the tokio clock, so a paused test runtime drives
/// fades and timers deterministically.
pub async fn run<H: Host>(
    mut viewer: Viewer<H>,
    mut events: mpsc::UnboundedReceiver<HostEvent>,
) -> Viewer<H> {
    while let Some(event) = events.recv().await {
        let now = Instant::now().into_std();
        tracing::trace!(?event, "host event");

        match event {
            HostEvent::DisplayImage(image) => viewer.display_image(image),
            HostEvent::AttachMedia(source) => {
                let requested = source.id();
                let attached = viewer.attach_source(source);
                if attached != requested {
                    tracing::debug!(%requested, %attached, "re-attached source runs under a new id");
                }
            }
            HostEvent::DetachMedia => viewer.detach_media(),
            HostEvent::Notification {
                source,
                notification,
            } => viewer.handle_notification(source, notification),
            HostEvent::Play => viewer.play(),
            HostEvent::Pause => viewer.pause(),
            HostEvent::FocusDidEnd { zoom_enabled } => viewer.focus_did_end(zoom_enabled, now),
            HostEvent::DefocusWillStart => viewer.defocus_will_start(),
            HostEvent::AppearanceWillChange { appearing } => {
                viewer.appearance_will_change(appearing);
            }
            HostEvent::ViewWillDisappear => viewer.view_will_disappear(),
            HostEvent::SingleTap(location) => viewer.single_tap(location, now),
            HostEvent::DoubleTap(location) => viewer.double_tap(location, now),
            HostEvent::ZoomDidChange => viewer.zoom_did_change(now),
            HostEvent::TimerFired(token) => viewer.timer_fired(token, now),
            HostEvent::Shutdown => {
                tracing::debug!("host event loop stopped");
                break;
            }
        }
    }
    viewer
}
