// SPDX-License-Identifier: MPL-2.0
//! Media readiness: source attachment, notification subscriptions and the
//! playback state machine driven by them.

pub mod controller;
pub mod ledger;
pub mod notification;
pub mod state;

pub use controller::{Effect, MediaReadinessController};
pub use ledger::ObservationLedger;
pub use notification::{Notification, NotificationKind, SourceStatus};
pub use state::PlaybackState;
