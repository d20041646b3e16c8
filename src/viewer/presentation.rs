// SPDX-License-Identifier: MPL-2.0
//! Flat/zoomable presentation switching.
//!
//! Exactly one surface is visible at a time. The inactive zoomable surface
//! is only hidden; it is destroyed and rebuilt on the next switch into
//! zoomable mode so no pan/zoom state leaks across focus sessions.

use crate::error::TransitionError;
use crate::geometry::Rectangle;
use crate::media::ImageHandle;
use crate::port::{CoordinateSpace, RenderSurface, Surface, SurfaceHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    #[default]
    Flat,
    Zoomable,
}

#[derive(Debug, Default)]
pub struct PresentationModeSwitcher {
    mode: PresentationMode,
    image: Option<ImageHandle>,
    zoom_surface: Option<SurfaceHandle>,
}

impl PresentationModeSwitcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `image` on the flat surface and remembers it for the next
    /// zoomable install.
    pub fn display_image<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, image: ImageHandle) {
        surface.set_image(Surface::Flat, &image);
        self.image = Some(image);
    }

    /// Installs a fresh zoomable surface over the content container, loaded
    /// with the displayed image, and hides the flat surface.
    pub fn enter_zoomable<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<SurfaceHandle, TransitionError> {
        if self.mode == PresentationMode::Zoomable {
            return Err(TransitionError::AlreadyZoomable);
        }
        let image = self
            .image
            .clone()
            .ok_or(TransitionError::NoDisplayableImage)?;

        if let Some(stale) = self.zoom_surface.take() {
            surface.destroy_zoomable_surface(stale);
        }

        let bounds = surface.container_bounds();
        let handle = surface.create_zoomable_surface(bounds);
        surface.set_image(Surface::Zoomable(handle), &image);
        surface.set_hidden(Surface::Flat, true);
        surface.set_hidden(Surface::Zoomable(handle), false);

        self.zoom_surface = Some(handle);
        self.mode = PresentationMode::Zoomable;
        tracing::debug!(surface = %handle, "zoomable surface installed");
        Ok(handle)
    }

    /// Hides the zoomable surface and shows the flat one framed exactly where
    /// the zoomed image was last visible. Returns that frame, in content
    /// container coordinates.
    pub fn exit_zoomable<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<Rectangle, TransitionError> {
        let handle = match (self.mode, self.zoom_surface) {
            (PresentationMode::Zoomable, Some(handle)) => handle,
            _ => return Err(TransitionError::NotZoomable),
        };

        let content_rect = surface.current_content_rect(handle);
        let frame = surface.convert(
            content_rect,
            CoordinateSpace::ZoomSurface(handle),
            CoordinateSpace::Content,
        );

        surface.set_hidden(Surface::Zoomable(handle), true);
        surface.set_hidden(Surface::Flat, false);
        surface.set_flat_frame(frame);

        self.mode = PresentationMode::Flat;
        tracing::debug!(surface = %handle, ?frame, "zoomable surface uninstalled");
        Ok(frame)
    }

    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// The active zoomable surface, if the mode is zoomable.
    #[must_use]
    pub fn active_zoom_surface(&self) -> Option<SurfaceHandle> {
        match self.mode {
            PresentationMode::Zoomable => self.zoom_surface,
            PresentationMode::Flat => None,
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }
}
