//! Capabilities the embedding host provides to the seek bar.
//!
//! The control never talks to a window system directly. Drawing goes through
//! a [`Surface`], the floating indicator lives in an [`OverlayHost`], and
//! gesture ownership is negotiated with a [`GestureArbiter`]. Together with
//! the [`FrameScheduler`] and repaint requests ([`Invalidator`]) these form a
//! [`SeekBarHost`].

use lyon_path::Path;

use crate::{
    color::Color,
    px::{Px, PxPosition, PxRect, PxSize},
    scheduler::FrameScheduler,
};

/// Measures single-line label text.
pub trait TextMeasurer {
    /// Returns the size `text` occupies when laid out on one line.
    fn measure_text(&self, text: &str) -> PxSize;
}

/// Primitive drawing operations.
///
/// Coordinates are in the local space of whatever is being painted: the
/// control for [`DiscreteSeekBar::draw`](crate::seekbar::DiscreteSeekBar::draw),
/// the overlay for
/// [`DiscreteSeekBar::draw_indicator`](crate::seekbar::DiscreteSeekBar::draw_indicator).
pub trait Surface: TextMeasurer {
    /// Fills a circle.
    fn draw_circle(&mut self, center: [f32; 2], radius: f32, color: Color);

    /// Fills a rectangle.
    fn draw_rect(&mut self, rect: PxRect, color: Color);

    /// Fills a path.
    fn draw_path(&mut self, path: &Path, color: Color);

    /// Draws `text` centered inside `bounds`.
    fn draw_text(&mut self, text: &str, bounds: PxRect, color: Color);
}

/// Opaque id of an overlay added to an [`OverlayHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Screen placement of the indicator overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPlacement {
    /// Left edge in screen coordinates.
    pub x: Px,
    /// Top edge in screen coordinates.
    pub y: Px,
    /// Overlay width. The indicator overlay spans the whole screen width so
    /// the marker can slide horizontally without re-placing the window.
    pub width: Px,
    /// Overlay height.
    pub height: Px,
}

/// Window-level surface that floats above the control.
pub trait OverlayHost {
    /// Top-left corner of the control on screen.
    fn location_on_screen(&self) -> PxPosition;

    /// Size of the screen the control lives on.
    fn screen_size(&self) -> PxSize;

    /// Adds an overlay at `placement`.
    fn add_overlay(&mut self, placement: OverlayPlacement) -> OverlayHandle;

    /// Removes an overlay synchronously.
    ///
    /// Removing a handle that is no longer attached must be a no-op.
    fn remove_overlay_immediate(&mut self, handle: OverlayHandle);

    /// Asks the host to repaint an overlay.
    fn invalidate_overlay(&mut self, handle: OverlayHandle);
}

/// Pointer gesture negotiation with ancestor containers.
pub trait GestureArbiter {
    /// Asks ancestors to stop intercepting the ongoing pointer gesture.
    fn claim_exclusive(&mut self);

    /// Whether an ancestor delays press recognition to tell taps from
    /// scrolls.
    fn is_in_scrolling_container(&self) -> bool;
}

/// Repaint requests for the control itself.
pub trait Invalidator {
    /// Asks the host to repaint `region` of the control.
    fn invalidate(&mut self, region: PxRect);
}

/// Everything the seek bar needs from its host.
pub trait SeekBarHost:
    FrameScheduler + OverlayHost + GestureArbiter + Invalidator + TextMeasurer
{
}

impl<T> SeekBarHost for T where
    T: FrameScheduler + OverlayHost + GestureArbiter + Invalidator + TextMeasurer + ?Sized
{
}
