// SPDX-License-Identifier: MPL-2.0
//! Media items handed to the viewer: playable sources and displayable images.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use url::Url;

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one [`MediaSource`] instance.
///
/// Two sources built from the same URI get different ids, so a re-attach
/// is always a full replace as far as subscriptions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id, for host adapters that need a map key.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// A playable item: a URI and whether it must be fetched over the network.
///
/// Immutable once built. Replacing the attached media means building a new
/// `MediaSource`, never mutating the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    id: SourceId,
    uri: String,
    is_remote: bool,
}

impl MediaSource {
    pub fn new(uri: impl Into<String>, is_remote: bool) -> Self {
        Self {
            id: SourceId::next(),
            uri: uri.into(),
            is_remote,
        }
    }

    /// Same URI and locality under a fresh id.
    #[must_use]
    pub fn reissue(&self) -> Self {
        Self::new(self.uri.clone(), self.is_remote)
    }

    /// Builds a source from a parsed URL; anything but `file:` is remote.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self::new(url.as_str(), url.scheme() != "file")
    }

    #[must_use]
    pub fn id(&self) -> SourceId {
        self.id
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.is_remote
    }
}

/// Opaque, cheaply cloneable reference to decoded image content owned by
/// the rendering host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(Arc<str>);

impl ImageHandle {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }
}
