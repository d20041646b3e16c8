// SPDX-License-Identifier: MPL-2.0
//! `focus_lens` is the controller core of a single-item image/video viewer
//! that can be focused (expanded) and defocused.
//!
//! It decides when a playable source is ready, when the loading indicator
//! shows, when the accessory overlay fades in and out, and how the image
//! moves between its flat and zoomable surfaces. Rendering and playback
//! stay with the host, reached through the traits in [`port`].

#![doc(html_root_url = "https://docs.rs/focus_lens/0.1.0")]

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod media;
pub mod playback;
pub mod port;
pub mod viewer;

pub use error::{Error, Result, TransitionError};
pub use viewer::{Timings, Viewer};
