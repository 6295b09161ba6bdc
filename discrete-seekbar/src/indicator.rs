//! Lifecycle of the floating value indicator.
//!
//! [`IndicatorController`] is the only owner of the overlay: it adds it to
//! the [`OverlayHost`], keeps the bubble above the thumb and removes it again
//! once the closing morph has played out.

use crate::{
    color::Color,
    dp::Density,
    host::{OverlayHandle, OverlayHost, OverlayPlacement, Surface, TextMeasurer},
    marker::{Marker, MarkerTransition, MarkerUpdate},
    px::{Px, PxPosition, PxRect, PxSize},
    scheduler::{FrameScheduler, FrameToken},
};

/// Visibility of the indicator overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorVisibility {
    /// Not attached to the host.
    #[default]
    Hidden,
    /// Attached, morphing open.
    Opening,
    /// Attached and open, label visible.
    Shown,
    /// Attached, morphing closed. Detached when the morph completes.
    Closing,
}

/// Owns the indicator overlay and its open/close protocol.
#[derive(Debug, Clone)]
pub struct IndicatorController {
    marker: Marker,
    visibility: IndicatorVisibility,
    overlay: Option<OverlayHandle>,
    anchor_location: PxPosition,
}

impl IndicatorController {
    /// Creates a hidden indicator.
    ///
    /// `thumb_size` is the closed size of the bubble; `separation` is the
    /// distance kept between the bubble and the thumb's bottom edge.
    pub fn new(
        density: Density,
        thumb_size: Px,
        separation: Px,
        indicator_color: Color,
        thumb_color: Color,
    ) -> Self {
        Self {
            marker: Marker::new(density, thumb_size, separation, indicator_color, thumb_color),
            visibility: IndicatorVisibility::Hidden,
            overlay: None,
            anchor_location: PxPosition::ZERO,
        }
    }

    /// Current visibility.
    pub fn visibility(&self) -> IndicatorVisibility {
        self.visibility
    }

    /// Whether the overlay is attached.
    pub fn is_showing(&self) -> bool {
        self.overlay.is_some()
    }

    /// Handle of the attached overlay.
    pub fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay
    }

    /// The bubble.
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Whether the label is painted.
    pub fn is_label_visible(&self) -> bool {
        self.marker.is_label_visible()
    }

    /// Replaces the label text.
    pub fn set_value(&mut self, label: String) {
        self.marker.set_label(label);
    }

    /// Open and closed colors of the bubble.
    pub fn set_colors(&mut self, indicator_color: Color, thumb_color: Color) {
        self.marker.set_colors(indicator_color, thumb_color);
    }

    /// Label color.
    pub fn set_text_color(&mut self, color: Color) {
        self.marker.set_text_color(color);
    }

    /// Resizes the bubble for the widest label. Any visible indicator is
    /// removed first.
    pub fn update_sizes<H>(&mut self, host: &mut H, max_label: &str)
    where
        H: OverlayHost + FrameScheduler + TextMeasurer + ?Sized,
    {
        self.dismiss_immediately(host);
        self.marker.reset_sizes(&*host, max_label);
    }

    /// Size of the bubble view.
    pub fn measured_size(&self) -> PxSize {
        self.marker.measured_size()
    }

    /// Shows the indicator above `anchor`, the thumb rectangle in control
    /// coordinates.
    ///
    /// An attached indicator only restarts its opening morph. Returns the
    /// completion when the bubble was already fully open.
    pub fn show<H>(&mut self, host: &mut H, anchor: PxRect) -> Option<MarkerTransition>
    where
        H: OverlayHost + FrameScheduler + ?Sized,
    {
        if self.overlay.is_none() {
            self.anchor_location = host.location_on_screen();
            let height = self.marker.measured_size().height;
            let placement = OverlayPlacement {
                x: Px::ZERO,
                y: self.anchor_location.y - height + anchor.bottom + self.marker.padding(),
                width: host.screen_size().width,
                height,
            };
            self.overlay = Some(host.add_overlay(placement));
            self.translate(host, anchor.center_x());
            tracing::debug!(?placement, "indicator attached");
        }
        self.visibility = IndicatorVisibility::Opening;
        let done = self.marker.animate_open(host);
        self.apply(host, done)
    }

    /// Follows the thumb horizontally. No-op while hidden.
    pub fn move_to<H>(&mut self, host: &mut H, center_x: Px)
    where
        H: OverlayHost + ?Sized,
    {
        if self.overlay.is_some() {
            self.translate(host, center_x);
        }
    }

    /// Starts closing. The label disappears immediately; the overlay is
    /// detached once the closing morph completes.
    ///
    /// Returns the completion when there was nothing left to close.
    pub fn dismiss<H>(&mut self, host: &mut H) -> Option<MarkerTransition>
    where
        H: OverlayHost + FrameScheduler + ?Sized,
    {
        if self.overlay.is_some() {
            self.visibility = IndicatorVisibility::Closing;
        }
        let done = self.marker.animate_close(host);
        self.apply(host, done)
    }

    /// Detaches the overlay right away, whatever state it is in.
    ///
    /// Safe to call repeatedly.
    pub fn dismiss_immediately<H>(&mut self, host: &mut H)
    where
        H: OverlayHost + FrameScheduler + ?Sized,
    {
        self.marker.reset(host);
        if let Some(handle) = self.overlay.take() {
            host.remove_overlay_immediate(handle);
            tracing::debug!(?handle, "indicator force-detached");
        }
        self.visibility = IndicatorVisibility::Hidden;
    }

    /// Processes a frame tick. Stale or foreign tokens come back as
    /// [`MarkerUpdate::Ignored`].
    pub fn on_frame<H>(&mut self, host: &mut H, token: FrameToken) -> MarkerUpdate
    where
        H: OverlayHost + FrameScheduler + ?Sized,
    {
        let update = self.marker.on_frame(host, token);
        match update {
            MarkerUpdate::Ignored => {}
            MarkerUpdate::Redraw => self.invalidate(host),
            MarkerUpdate::Completed(done) => {
                self.apply(host, Some(done));
            }
        }
        update
    }

    /// Paints the bubble in overlay coordinates.
    pub fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        if self.overlay.is_some() {
            self.marker.draw(surface);
        }
    }

    fn apply<H>(&mut self, host: &mut H, done: Option<MarkerTransition>) -> Option<MarkerTransition>
    where
        H: OverlayHost + ?Sized,
    {
        match done {
            Some(MarkerTransition::Opened) if self.overlay.is_some() => {
                self.visibility = IndicatorVisibility::Shown;
                tracing::debug!("indicator shown");
            }
            Some(MarkerTransition::Closed) => {
                if let Some(handle) = self.overlay.take() {
                    host.remove_overlay_immediate(handle);
                    tracing::debug!(?handle, "indicator detached");
                }
                self.visibility = IndicatorVisibility::Hidden;
            }
            _ => {}
        }
        self.invalidate(host);
        done
    }

    fn translate<H: OverlayHost + ?Sized>(&mut self, host: &mut H, center_x: Px) {
        self.marker
            .set_float_offset(center_x + self.anchor_location.x);
        self.invalidate(host);
    }

    fn invalidate<H: OverlayHost + ?Sized>(&self, host: &mut H) {
        if let Some(handle) = self.overlay {
            host.invalidate_overlay(handle);
        }
    }
}
