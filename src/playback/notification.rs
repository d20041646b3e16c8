// SPDX-License-Identifier: MPL-2.0
//! Readiness notifications delivered by the playable-source host.

use crate::geometry::Size;
use std::fmt;

/// The notification channels the controller subscribes to on every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationKind {
    PresentationSize,
    BufferEmpty,
    LikelyToKeepUp,
    Status,
}

impl NotificationKind {
    /// Every kind, in subscription order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::PresentationSize,
        NotificationKind::BufferEmpty,
        NotificationKind::LikelyToKeepUp,
        NotificationKind::Status,
    ];
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationKind::PresentationSize => "presentation-size-changed",
            NotificationKind::BufferEmpty => "buffer-empty",
            NotificationKind::LikelyToKeepUp => "likely-to-keep-up",
            NotificationKind::Status => "status-changed",
        };
        f.write_str(name)
    }
}

/// Overall readiness reported by the host for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceStatus {
    #[default]
    Unknown,
    ReadyToPlay,
    Failed,
}

/// A single notification with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// Natural size of the decoded video changed.
    PresentationSizeChanged(Size),
    BufferEmpty(bool),
    LikelyToKeepUp(bool),
    StatusChanged(SourceStatus),
}

impl Notification {
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::PresentationSizeChanged(_) => NotificationKind::PresentationSize,
            Notification::BufferEmpty(_) => NotificationKind::BufferEmpty,
            Notification::LikelyToKeepUp(_) => NotificationKind::LikelyToKeepUp,
            Notification::StatusChanged(_) => NotificationKind::Status,
        }
    }
}
