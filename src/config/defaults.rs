// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Overlay**: auto-hide delay and fade duration
//! - **Zoom**: double-tap zoom animation
//! - **Gesture**: double-tap recognition window
//! - **Layout**: scrubber control margin

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Idle period before the accessory overlay fades out (milliseconds).
pub const DEFAULT_AUTO_HIDE_DELAY_MS: u64 = 1500;

/// Minimum auto-hide delay (milliseconds).
pub const MIN_AUTO_HIDE_DELAY_MS: u64 = 250;

/// Maximum auto-hide delay (milliseconds).
pub const MAX_AUTO_HIDE_DELAY_MS: u64 = 30_000;

/// Duration of the overlay opacity fade (milliseconds).
pub const DEFAULT_OVERLAY_FADE_MS: u64 = 500;

/// Maximum overlay fade duration (milliseconds). Zero disables the fade.
pub const MAX_OVERLAY_FADE_MS: u64 = 5_000;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Duration of the double-tap zoom animation (milliseconds).
pub const DEFAULT_ZOOM_ANIMATION_MS: u64 = 500;

/// Maximum zoom animation duration (milliseconds).
pub const MAX_ZOOM_ANIMATION_MS: u64 = 5_000;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Window within which a second tap turns a single tap into a double tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Minimum double-tap window (milliseconds).
pub const MIN_DOUBLE_TAP_WINDOW_MS: u64 = 100;

/// Maximum double-tap window (milliseconds).
pub const MAX_DOUBLE_TAP_WINDOW_MS: u64 = 1_000;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Margin around the scrubber control, in points.
pub const DEFAULT_CONTROL_MARGIN: f32 = 5.0;

/// Maximum scrubber control margin, in points.
pub const MAX_CONTROL_MARGIN: f32 = 64.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_AUTO_HIDE_DELAY_MS > 0);
    assert!(DEFAULT_AUTO_HIDE_DELAY_MS >= MIN_AUTO_HIDE_DELAY_MS);
    assert!(DEFAULT_AUTO_HIDE_DELAY_MS <= MAX_AUTO_HIDE_DELAY_MS);

    assert!(DEFAULT_OVERLAY_FADE_MS <= MAX_OVERLAY_FADE_MS);
    assert!(DEFAULT_ZOOM_ANIMATION_MS <= MAX_ZOOM_ANIMATION_MS);

    assert!(MIN_DOUBLE_TAP_WINDOW_MS > 0);
    assert!(DEFAULT_DOUBLE_TAP_WINDOW_MS >= MIN_DOUBLE_TAP_WINDOW_MS);
    assert!(DEFAULT_DOUBLE_TAP_WINDOW_MS <= MAX_DOUBLE_TAP_WINDOW_MS);

    assert!(DEFAULT_CONTROL_MARGIN >= 0.0);
    assert!(DEFAULT_CONTROL_MARGIN <= MAX_CONTROL_MARGIN);
};
