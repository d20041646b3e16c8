// SPDX-License-Identifier: MPL-2.0
//! Scrubber control placement inside the accessory overlay.

use crate::geometry::{self, Rectangle, Size};

/// Rectangle the video actually occupies inside the player bounds, rounded
/// out to whole pixels. Empty until the presentation size is known.
#[must_use]
pub fn video_frame(presentation_size: Size, player_bounds: Rectangle) -> Rectangle {
    if presentation_size.width <= 0.0 || presentation_size.height <= 0.0 {
        return geometry::ZERO_RECT;
    }
    geometry::integral(geometry::aspect_fit(presentation_size, player_bounds))
}

/// Frame of the scrubber control.
///
/// The control spans the container width minus `margin` on each side and sits
/// one margin above the title. Once the video frame is known, it is also
/// kept at least one margin above the video's bottom edge.
#[must_use]
pub fn control_frame(
    container_width: f32,
    control_height: f32,
    margin: f32,
    title_frame: Rectangle,
    video_frame: Rectangle,
) -> Rectangle {
    let mut y = title_frame.y - control_height - margin;
    if video_frame.width > 0.0 {
        let video_bottom = video_frame.y + video_frame.height;
        y = y.min(video_bottom - control_height - margin);
    }

    Rectangle {
        x: margin,
        y,
        width: (container_width - margin * 2.0).max(0.0),
        height: control_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn title() -> Rectangle {
        Rectangle::new(Point::new(5.0, 440.0), Size::new(310.0, 30.0))
    }

    #[test]
    fn unknown_presentation_size_gives_empty_video_frame() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(320.0, 480.0));
        assert_eq!(video_frame(Size::ZERO, bounds), geometry::ZERO_RECT);
    }

    #[test]
    fn video_frame_is_aspect_fit_and_integral() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(320.0, 480.0));
        let frame = video_frame(Size::new(1920.0, 1080.0), bounds);

        assert_eq!(frame.width, 320.0);
        assert_eq!(frame.height, 180.0);
        assert_eq!(frame.y, 150.0);
    }

    #[test]
    fn control_sits_above_title_without_video() {
        let frame = control_frame(320.0, 40.0, 5.0, title(), geometry::ZERO_RECT);

        assert_eq!(frame.x, 5.0);
        assert_eq!(frame.width, 310.0);
        assert_eq!(frame.y, 440.0 - 40.0 - 5.0);
    }

    #[test]
    fn control_is_raised_above_video_bottom() {
        let video = Rectangle::new(Point::new(0.0, 150.0), Size::new(320.0, 180.0));
        let frame = control_frame(320.0, 40.0, 5.0, title(), video);

        assert_eq!(frame.y, 330.0 - 40.0 - 5.0);
    }

    #[test]
    fn control_stays_above_title_when_video_is_lower() {
        let video = Rectangle::new(Point::new(0.0, 0.0), Size::new(320.0, 480.0));
        let frame = control_frame(320.0, 40.0, 5.0, title(), video);

        assert_eq!(frame.y, 395.0);
    }
}
