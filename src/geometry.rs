// SPDX-License-Identifier: MPL-2.0
//! Geometry helpers shared by the presentation, overlay and gesture layers.
//!
//! Plain value types come from `iced_core`; this module only adds the
//! handful of operations the viewer needs on top of them.

pub use iced_core::{Point, Rectangle, Size, Vector};

/// Empty rectangle at the origin.
pub const ZERO_RECT: Rectangle = Rectangle {
    x: 0.0,
    y: 0.0,
    width: 0.0,
    height: 0.0,
};

/// Affine transform applied to a view relative to its parent.
///
/// Only the parts the overlay needs to carry across a re-parent are
/// modelled: uniform scale, rotation and translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f32,
    pub translation: Vector,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        rotation: 0.0,
        translation: Vector { x: 0.0, y: 0.0 },
    };

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Largest rectangle with the aspect ratio of `aspect` that fits inside
/// `bounds`, centered on it.
///
/// A degenerate aspect (zero or negative dimension) yields an empty
/// rectangle at the center of `bounds`.
#[must_use]
pub fn aspect_fit(aspect: Size, bounds: Rectangle) -> Rectangle {
    let center = bounds.center();
    if aspect.width <= 0.0 || aspect.height <= 0.0 {
        return Rectangle::new(center, Size::ZERO);
    }

    let (width, height) = if bounds.width * aspect.height <= bounds.height * aspect.width {
        (bounds.width, bounds.width * aspect.height / aspect.width)
    } else {
        (bounds.height * aspect.width / aspect.height, bounds.height)
    };

    Rectangle {
        x: center.x - width / 2.0,
        y: center.y - height / 2.0,
        width,
        height,
    }
}

/// Smallest rectangle with whole-number edges that contains `rect`.
#[must_use]
pub fn integral(rect: Rectangle) -> Rectangle {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Rectangle::new(Point::new(rect.x, rect.y), Size::ZERO);
    }
    let min_x = rect.x.floor();
    let min_y = rect.y.floor();
    let max_x = (rect.x + rect.width).ceil();
    let max_y = (rect.y + rect.height).ceil();

    Rectangle {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Visible rectangle to scroll to after zooming to `scale` around `location`.
///
/// `location` is in unzoomed content coordinates; the result is in zoomed
/// content coordinates and has the size of the viewport, centered on the
/// scaled tap location.
#[must_use]
pub fn zoom_target_rect(location: Point, scale: f32, viewport: Size) -> Rectangle {
    Rectangle {
        x: location.x * scale - viewport.width / 2.0,
        y: location.y * scale - viewport.height / 2.0,
        width: viewport.width,
        height: viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_fit_letterboxes_wide_content() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(400.0, 400.0));
        let fit = aspect_fit(Size::new(1920.0, 1080.0), bounds);

        assert_relative_eq!(fit.width, 400.0, epsilon = 1e-3);
        assert_relative_eq!(fit.height, 225.0, epsilon = 1e-3);
        assert_relative_eq!(fit.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(fit.y, 87.5, epsilon = 1e-3);
    }

    #[test]
    fn aspect_fit_pillarboxes_tall_content() {
        let bounds = Rectangle::new(Point::new(10.0, 20.0), Size::new(300.0, 200.0));
        let fit = aspect_fit(Size::new(100.0, 200.0), bounds);

        assert_eq!(fit.height, 200.0);
        assert_eq!(fit.width, 100.0);
        assert_eq!(fit.x, 110.0);
        assert_eq!(fit.y, 20.0);
    }

    #[test]
    fn aspect_fit_of_zero_size_is_empty() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(300.0, 200.0));
        let fit = aspect_fit(Size::ZERO, bounds);
        assert_eq!(fit.width, 0.0);
        assert_eq!(fit.height, 0.0);
    }

    #[test]
    fn integral_rounds_outward() {
        let rect = Rectangle {
            x: 0.5,
            y: 87.5,
            width: 399.2,
            height: 225.0,
        };
        let rounded = integral(rect);
        assert_eq!(rounded.x, 0.0);
        assert_eq!(rounded.y, 87.0);
        assert_eq!(rounded.width, 400.0);
        assert_eq!(rounded.height, 226.0);
    }

    #[test]
    fn zoom_target_centers_scaled_location() {
        let rect = zoom_target_rect(Point::new(100.0, 50.0), 3.0, Size::new(320.0, 480.0));
        assert_eq!(rect.x, 300.0 - 160.0);
        assert_eq!(rect.y, 150.0 - 240.0);
        assert_eq!(rect.width, 320.0);
        assert_eq!(rect.height, 480.0);
    }

    #[test]
    fn default_transform_is_identity() {
        assert!(Transform::default().is_identity());
        let scaled = Transform {
            scale: 0.5,
            ..Transform::IDENTITY
        };
        assert!(!scaled.is_identity());
    }
}
