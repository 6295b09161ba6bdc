//! Placement of the track, scrubber and thumb inside the control.

use crate::{
    dp::{Density, Dp},
    px::{Px, PxRect, PxSize},
};

/// Inner padding of the control.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Padding {
    /// Left padding.
    pub left: Px,
    /// Top padding.
    pub top: Px,
    /// Right padding.
    pub right: Px,
    /// Bottom padding.
    pub bottom: Px,
}

impl Padding {
    /// The same padding on all four sides.
    pub const fn all(value: Px) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Pixel sizes of the control's parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackMetrics {
    /// Diameter of the thumb.
    pub thumb_size: Px,
    /// Extra hit area added around the thumb so the touch target reaches the
    /// minimum size.
    pub touch_padding: Px,
    /// Thickness of the background track.
    pub track_height: Px,
    /// Thickness of the filled part of the track.
    pub scrubber_height: Px,
}

impl TrackMetrics {
    /// Resolves dp dimensions for `density`.
    pub fn resolve(
        density: Density,
        thumb_size: Dp,
        min_touch_target: Dp,
        track_height: Dp,
        scrubber_height: Dp,
    ) -> Self {
        let thumb_size = thumb_size.to_px(density);
        let touch_target = min_touch_target.to_px(density);
        Self {
            thumb_size,
            touch_padding: Px(((touch_target - thumb_size).0 / 2).max(0)),
            track_height: track_height.to_px(density),
            scrubber_height: scrubber_height.to_px(density),
        }
    }
}

/// Geometry of one laid-out control.
///
/// The track runs between the centers of the thumb at its two extreme
/// positions, so the thumb never leaves the padded content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackLayout {
    size: PxSize,
    padding: Padding,
    metrics: TrackMetrics,
}

impl TrackLayout {
    /// Lays out a control of `size`.
    pub fn new(size: PxSize, padding: Padding, metrics: TrackMetrics) -> Self {
        Self {
            size,
            padding,
            metrics,
        }
    }

    /// Height the control wants: the thumb, its touch padding above and
    /// below, and the vertical padding.
    pub fn measured_height(metrics: TrackMetrics, padding: Padding) -> Px {
        metrics.thumb_size + padding.top + padding.bottom + Px(metrics.touch_padding.0 * 2)
    }

    /// Control size.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Part sizes.
    pub fn metrics(&self) -> TrackMetrics {
        self.metrics
    }

    /// Horizontal position of the left end of the track.
    pub fn track_start(&self) -> Px {
        self.padding.left + self.metrics.touch_padding + self.metrics.thumb_size.half()
    }

    /// Horizontal position of the right end of the track.
    pub fn track_end(&self) -> Px {
        self.size.width
            - self.padding.right
            - self.metrics.touch_padding
            - self.metrics.thumb_size.half()
    }

    /// Usable track length, never negative.
    pub fn track_length(&self) -> Px {
        Px((self.track_end() - self.track_start()).0.max(0))
    }

    /// Bottom edge of the thumb.
    pub fn thumb_bottom(&self) -> Px {
        self.size.height - self.padding.bottom - self.metrics.touch_padding
    }

    /// Vertical center line shared by track, scrubber and thumb.
    pub fn center_y(&self) -> Px {
        self.thumb_bottom() - self.metrics.thumb_size.half()
    }

    /// Clamps a thumb center onto the track.
    pub fn clamp_center(&self, x: Px) -> Px {
        let start = self.track_start();
        x.max(start).min(start + self.track_length())
    }

    /// Horizontal thumb center for an offset along the track.
    pub fn center_for_offset(&self, offset: Px) -> Px {
        self.track_start() + offset
    }

    /// Offset along the track for a thumb center.
    pub fn offset_for_center(&self, center_x: Px) -> Px {
        self.clamp_center(center_x) - self.track_start()
    }

    /// Background track rectangle.
    pub fn track_rect(&self) -> PxRect {
        let half = Px((self.metrics.track_height.0 / 2).max(1));
        let cy = self.center_y();
        PxRect::new(self.track_start(), cy - half, self.track_end(), cy + half)
    }

    /// Thumb rectangle centered at `center_x`.
    pub fn thumb_rect(&self, center_x: Px) -> PxRect {
        let size = self.metrics.thumb_size;
        let left = center_x - size.half();
        let bottom = self.thumb_bottom();
        PxRect::new(left, bottom - size, left + size, bottom)
    }

    /// Thumb rectangle grown by the touch padding.
    pub fn touch_bounds(&self, thumb: PxRect) -> PxRect {
        let pad = self.metrics.touch_padding;
        thumb.inset(-pad, -pad)
    }

    /// Filled part of the track, from the start side up to the thumb center.
    ///
    /// In mirrored layouts the start side is the right end.
    pub fn scrubber_rect(&self, thumb_center_x: Px, rtl: bool) -> PxRect {
        let half = Px((self.metrics.scrubber_height.0 / 2).max(2));
        let cy = self.center_y();
        if rtl {
            PxRect::new(thumb_center_x, cy - half, self.track_end(), cy + half)
        } else {
            PxRect::new(self.track_start(), cy - half, thumb_center_x, cy + half)
        }
    }
}
