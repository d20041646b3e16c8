// SPDX-License-Identifier: MPL-2.0
//! Scripted demo: drives a viewer through a focus session against the
//! recording host and logs what it did.

use focus_lens::config::{self, Config};
use focus_lens::geometry::{Point, Size};
use focus_lens::host::{self, HostEvent, RecordingHost, TokioTimers};
use focus_lens::media::{ImageHandle, MediaSource};
use focus_lens::playback::{Notification, SourceStatus};
use focus_lens::{Timings, Viewer};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use url::Url;

const USAGE: &str = "\
Usage: focus_lens [--config PATH] [--remote] [--zoom] URI

Options:
  --config PATH  settings.toml to read instead of the user config
  --remote       treat URI as a network stream (shows the loading indicator)
  --zoom         zoom into the poster image before the video is attached";

struct Flags {
    config_path: Option<PathBuf>,
    remote: bool,
    zoom: bool,
    uri: String,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let config_path = args.opt_value_from_str("--config")?;
    let remote = args.contains("--remote");
    let zoom = args.contains("--zoom");
    let uri = args.free_from_str()?;
    Ok(Flags {
        config_path,
        remote,
        zoom,
        uri,
    })
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to default settings");
        Config::default()
    })
}

fn media_source(flags: &Flags) -> MediaSource {
    match Url::parse(&flags.uri) {
        Ok(url) if !flags.remote => MediaSource::from_url(&url),
        _ => MediaSource::new(flags.uri.clone(), flags.remote),
    }
}

/// Optional zoom session over the poster, then attach, focus, load,
/// auto-hide, tap, defocus and teardown.
fn script(source: MediaSource, zoom: bool) -> Vec<(Duration, HostEvent)> {
    let id = source.id();
    let center = Point::new(195.0, 422.0);
    let mut steps = vec![(
        Duration::ZERO,
        HostEvent::DisplayImage(ImageHandle::new("poster")),
    )];
    if zoom {
        steps.extend([
            (
                Duration::ZERO,
                HostEvent::FocusDidEnd { zoom_enabled: true },
            ),
            (Duration::from_millis(600), HostEvent::DoubleTap(center)),
            (Duration::ZERO, HostEvent::ZoomDidChange),
            (Duration::from_millis(600), HostEvent::DefocusWillStart),
        ]);
    }
    steps.extend([
        (Duration::ZERO, HostEvent::AttachMedia(source)),
        (
            Duration::ZERO,
            HostEvent::FocusDidEnd { zoom_enabled: zoom },
        ),
        (
            Duration::from_millis(200),
            HostEvent::Notification {
                source: id,
                notification: Notification::PresentationSizeChanged(Size::new(1920.0, 1080.0)),
            },
        ),
        (
            Duration::ZERO,
            HostEvent::Notification {
                source: id,
                notification: Notification::StatusChanged(SourceStatus::ReadyToPlay),
            },
        ),
        (Duration::from_secs(2), HostEvent::SingleTap(center)),
        (Duration::from_millis(600), HostEvent::DefocusWillStart),
        (
            Duration::ZERO,
            HostEvent::AppearanceWillChange { appearing: false },
        ),
        (Duration::ZERO, HostEvent::ViewWillDisappear),
        (Duration::ZERO, HostEvent::Shutdown),
    ]);
    steps
}

async fn play_script(events: mpsc::UnboundedSender<HostEvent>, steps: Vec<(Duration, HostEvent)>) {
    for (delay, event) in steps {
        tokio::time::sleep(delay).await;
        if events.send(event).is_err() {
            break;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("focus_lens=info")),
        )
        .init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = load_config(flags.config_path.as_ref());
    let source = media_source(&flags);
    tracing::info!(source = %source.id(), uri = source.uri(), remote = source.is_remote(), "starting session");

    let (events, receiver) = mpsc::unbounded_channel();
    let host = RecordingHost::new(Size::new(390.0, 844.0)).with_timers(TokioTimers::new(events.clone()));
    let viewer = Viewer::new(host, Timings::from(&config));

    tokio::spawn(play_script(events, script(source, flags.zoom)));
    let viewer = host::run(viewer, receiver).await;

    let host = viewer.host();
    for call in host.calls() {
        tracing::debug!(?call, "host call");
    }
    tracing::info!(
        calls = host.calls().len(),
        state = ?viewer.playback_state(),
        mode = ?viewer.presentation_mode(),
        "session finished"
    );

    if host.violations().is_empty() {
        ExitCode::SUCCESS
    } else {
        for violation in host.violations() {
            tracing::error!(%violation, "host protocol violation");
        }
        ExitCode::FAILURE
    }
}
