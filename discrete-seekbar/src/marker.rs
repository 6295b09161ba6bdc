//! The indicator bubble: a morphing teardrop shape with a value label.
//!
//! Closed, the shape is a circle exactly covering the thumb. Opening grows it
//! into a rotated rounded square whose sharp corner points down at the thumb,
//! blending its color from the thumb's to the indicator's. The label is
//! revealed only once the opening morph completes and hidden as soon as a
//! close starts.

use lyon_path::{
    Path, Winding,
    builder::BorderRadii,
    math::{Angle, Box2D, Transform, point, vector},
};

use crate::{
    animation::{DEFAULT_DURATION, DurationScaling, TimedAnimation},
    color::Color,
    dp::{Density, Dp},
    host::{Surface, TextMeasurer},
    px::{Px, PxRect, PxSize},
    scheduler::{AnimationChannel, FrameScheduler, FrameToken},
};

/// Padding around the label, and around the bubble for its shadow.
const PADDING: Dp = Dp(4.0);

/// Completed half of the open/close protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTransition {
    /// The opening morph finished.
    Opened,
    /// The closing morph finished.
    Closed,
}

impl MarkerTransition {
    /// Delivers the transition to `listener`.
    pub fn notify<L, S>(self, listener: &mut L, scheduler: &mut S)
    where
        L: MarkerAnimationListener + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        match self {
            MarkerTransition::Opened => listener.on_opening_complete(scheduler),
            MarkerTransition::Closed => listener.on_closing_complete(scheduler),
        }
    }
}

/// Receives morph completion events.
pub trait MarkerAnimationListener {
    /// The bubble finished opening.
    fn on_opening_complete<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S);

    /// The bubble finished closing.
    fn on_closing_complete<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S);
}

/// Result of feeding a frame token to the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerUpdate {
    /// The token was not for the marker, or was stale.
    Ignored,
    /// The shape changed.
    Redraw,
    /// The shape changed and a morph finished.
    Completed(MarkerTransition),
}

/// Builds the bubble outline for `scale` in `[0, 1]`.
///
/// `bounds` is the area the bubble may occupy; the closed shape sits at its
/// bottom, `external_offset` above the bottom edge.
pub fn marker_path(bounds: PxRect, closed_size: f32, scale: f32, external_offset: Px) -> Path {
    let left = bounds.left.to_f32();
    let top = bounds.top.to_f32();
    let total = bounds.width().min(bounds.height()).to_f32();
    let size = closed_size + (total - closed_size) * scale;
    let half = size / 2.0;
    let inverse = 1.0 - scale;

    let rect = Box2D::new(point(left, top), point(left + size, top + size));
    let radii = BorderRadii {
        top_left: half,
        top_right: half,
        bottom_right: half,
        bottom_left: half * inverse,
    };

    let center = vector(left + half, top + half);
    let dx = (bounds.width().to_f32() - size) / 2.0;
    let dy = (bounds.bottom.to_f32() - size - external_offset.to_f32()) * inverse;
    let transform = Transform::translation(-center.x, -center.y)
        .then_rotate(Angle::degrees(-45.0))
        .then_translate(center + vector(dx, dy));

    let mut builder = Path::builder();
    builder.add_rounded_rectangle(&rect, &radii, Winding::Negative);
    builder.build().transformed(&transform)
}

/// The morphing shape of the indicator.
#[derive(Debug, Clone)]
pub struct MarkerDrawable {
    closed_size: f32,
    scale: TimedAnimation,
    closing: bool,
    start_color: Color,
    end_color: Color,
    external_offset: Px,
    bounds: PxRect,
    path: Path,
}

impl MarkerDrawable {
    /// Creates a closed marker the size of the thumb.
    ///
    /// `start_color` is the fully open color, `end_color` the closed one.
    pub fn new(closed_size: Px, start_color: Color, end_color: Color) -> Self {
        Self {
            closed_size: closed_size.to_f32(),
            scale: TimedAnimation::new(
                AnimationChannel::Marker,
                0.0,
                DEFAULT_DURATION,
                DurationScaling::Span(1.0),
            ),
            closing: false,
            start_color,
            end_color,
            external_offset: Px::ZERO,
            bounds: PxRect::ZERO,
            path: Path::new(),
        }
    }

    /// Open factor in `[0, 1]`.
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Whether a morph is in flight.
    pub fn is_running(&self) -> bool {
        self.scale.is_running()
    }

    /// Current outline.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current fill color.
    pub fn color(&self) -> Color {
        Color::blend(self.start_color, self.end_color, self.scale.value())
    }

    /// Replaces the open and closed colors.
    pub fn set_colors(&mut self, start_color: Color, end_color: Color) {
        self.start_color = start_color;
        self.end_color = end_color;
    }

    /// Gap kept between the closed shape and the bottom of the bounds.
    pub fn set_external_offset(&mut self, offset: Px) {
        self.external_offset = offset;
        self.compute_path();
    }

    /// Area the shape may occupy.
    pub fn bounds(&self) -> PxRect {
        self.bounds
    }

    /// Moves or resizes the shape.
    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.bounds = bounds;
        self.compute_path();
    }

    /// Starts opening. Returns the completion right away if already open.
    pub fn animate_to_pressed<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<MarkerTransition> {
        self.closing = false;
        let current = self.scale.value();
        let frame = self.scale.start(scheduler, current, 1.0)?;
        self.compute_path();
        frame.finished.then_some(MarkerTransition::Opened)
    }

    /// Starts closing. Returns the completion right away if already closed.
    pub fn animate_to_normal<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<MarkerTransition> {
        self.closing = true;
        let current = self.scale.value();
        let frame = self.scale.start(scheduler, current, 0.0)?;
        self.compute_path();
        frame.finished.then_some(MarkerTransition::Closed)
    }

    /// Stops the morph where it is, without completion.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.scale.cancel(scheduler);
    }

    /// Stops any morph and snaps back to the closed shape.
    pub fn reset<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.scale.jump_to(scheduler, 0.0);
        self.compute_path();
    }

    /// Processes a frame tick.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        token: FrameToken,
    ) -> MarkerUpdate {
        let Some(frame) = self.scale.tick(scheduler, token) else {
            return MarkerUpdate::Ignored;
        };
        self.compute_path();
        if !frame.finished {
            return MarkerUpdate::Redraw;
        }
        MarkerUpdate::Completed(if self.closing {
            MarkerTransition::Closed
        } else {
            MarkerTransition::Opened
        })
    }

    /// Fills the outline.
    pub fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        if self.bounds.is_empty() {
            return;
        }
        surface.draw_path(&self.path, self.color());
    }

    fn compute_path(&mut self) {
        if self.bounds.is_empty() {
            self.path = Path::new();
            return;
        }
        self.path = marker_path(
            self.bounds,
            self.closed_size,
            self.scale.value(),
            self.external_offset,
        );
    }
}

/// The bubble view: shape plus label, sized for the widest label.
#[derive(Debug, Clone)]
pub struct Marker {
    drawable: MarkerDrawable,
    label: String,
    label_visible: bool,
    text_color: Color,
    padding: Px,
    label_side: Px,
    separation: Px,
    left: Px,
}

impl Marker {
    /// Creates a closed marker.
    ///
    /// `separation` is added below the bubble so its tip reaches the thumb.
    pub fn new(
        density: Density,
        closed_size: Px,
        separation: Px,
        start_color: Color,
        end_color: Color,
    ) -> Self {
        let padding = Px(PADDING.to_px(density).0 * 2);
        let mut drawable = MarkerDrawable::new(closed_size, start_color, end_color);
        drawable.set_external_offset(padding);
        let mut marker = Self {
            drawable,
            label: String::new(),
            label_visible: false,
            text_color: Color::WHITE,
            padding,
            label_side: Px::ZERO,
            separation,
            left: Px::ZERO,
        };
        marker.layout();
        marker
    }

    /// Sizes the bubble for `max_label`, reserving room for a minus sign.
    ///
    /// The label area is square so the bubble does not change size with the
    /// value.
    pub fn reset_sizes<M: TextMeasurer + ?Sized>(&mut self, measurer: &M, max_label: &str) {
        let text = format!("-{max_label}");
        let measured = measurer.measure_text(&text);
        let width = measured.width + self.padding + self.padding;
        self.label_side = width.max(measured.height);
        self.layout();
    }

    /// Size of the whole bubble view, including the diagonal overhang of the
    /// rotated square and the separation from the thumb.
    pub fn measured_size(&self) -> PxSize {
        let side = self.label_side;
        let diff = Px((1.41 * side.to_f32() - side.to_f32()) as i32 / 2);
        PxSize::new(
            side + self.padding + self.padding,
            side + self.padding + self.padding + diff + self.separation,
        )
    }

    /// Bottom padding of the bubble view.
    pub fn padding(&self) -> Px {
        self.padding
    }

    /// Centers the bubble horizontally on `x` (overlay coordinates).
    pub fn set_float_offset(&mut self, x: Px) {
        self.left = x - self.measured_size().width.half();
        self.layout();
    }

    /// Left edge of the bubble view in overlay coordinates.
    pub fn left(&self) -> Px {
        self.left
    }

    /// Label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the label text.
    pub fn set_label(&mut self, label: String) {
        self.label = label;
    }

    /// Whether the label is painted.
    pub fn is_label_visible(&self) -> bool {
        self.label_visible
    }

    /// Label color.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// The shape.
    pub fn drawable(&self) -> &MarkerDrawable {
        &self.drawable
    }

    /// Replaces the open and closed colors of the shape.
    pub fn set_colors(&mut self, start_color: Color, end_color: Color) {
        self.drawable.set_colors(start_color, end_color);
    }

    /// Area of the label in overlay coordinates.
    pub fn label_rect(&self) -> PxRect {
        let left = self.left + self.padding;
        let top = self.padding;
        PxRect::new(left, top, left + self.label_side, top + self.label_side)
    }

    /// Restarts the opening morph.
    pub fn animate_open<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<MarkerTransition> {
        self.drawable.stop(scheduler);
        let done = self.drawable.animate_to_pressed(scheduler);
        if done.is_some() {
            self.label_visible = true;
        }
        done
    }

    /// Hides the label and starts the closing morph.
    pub fn animate_close<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<MarkerTransition> {
        self.drawable.stop(scheduler);
        self.label_visible = false;
        self.drawable.animate_to_normal(scheduler)
    }

    /// Drops any morph and returns to the closed, label-less state.
    pub fn reset<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.label_visible = false;
        self.drawable.reset(scheduler);
    }

    /// Processes a frame tick.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        token: FrameToken,
    ) -> MarkerUpdate {
        let update = self.drawable.on_frame(scheduler, token);
        if update == MarkerUpdate::Completed(MarkerTransition::Opened) {
            self.label_visible = true;
        }
        update
    }

    /// Paints the bubble and, once open, the label.
    pub fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        self.drawable.draw(surface);
        if self.label_visible {
            surface.draw_text(&self.label, self.label_rect(), self.text_color);
        }
    }

    fn layout(&mut self) {
        let size = self.measured_size();
        let bounds = PxRect::new(
            self.left + self.padding,
            self.padding,
            self.left + size.width - self.padding,
            size.height - self.padding,
        );
        self.drawable.set_bounds(bounds);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lyon_path::{PathEvent, math::Point};

    use super::*;
    use crate::{headless::ManualScheduler, scheduler::Instant};

    fn endpoints(path: &Path) -> Vec<Point> {
        path.iter()
            .filter_map(|event| match event {
                PathEvent::Begin { at } => Some(at),
                PathEvent::Line { to, .. }
                | PathEvent::Quadratic { to, .. }
                | PathEvent::Cubic { to, .. } => Some(to),
                PathEvent::End { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_open_shape_points_down_from_center() {
        let bounds = PxRect::new(Px(0), Px(0), Px(100), Px(120));
        let points = endpoints(&marker_path(bounds, 12.0, 1.0, Px(0)));
        let tip = points
            .iter()
            .copied()
            .fold(point(0.0, f32::MIN), |a, b| if b.y > a.y { b } else { a });
        assert!((tip.x - 50.0).abs() < 0.5, "tip {tip:?}");
        assert!((tip.y - (50.0 + 50.0 * std::f32::consts::SQRT_2)).abs() < 0.5);
    }

    #[test]
    fn test_closed_shape_is_thumb_circle_at_bottom() {
        let bounds = PxRect::new(Px(0), Px(0), Px(100), Px(120));
        let points = endpoints(&marker_path(bounds, 12.0, 0.0, Px(0)));
        assert!(!points.is_empty());
        for p in points {
            let distance = ((p.x - 50.0).powi(2) + (p.y - 114.0).powi(2)).sqrt();
            assert!(distance <= 6.01, "{p:?} outside thumb circle");
        }
    }

    #[test]
    fn test_color_blends_from_closed_to_open() {
        let drawable = MarkerDrawable::new(Px(12), Color::WHITE, Color::BLACK);
        assert_eq!(drawable.color(), Color::BLACK);
    }

    #[test]
    fn test_label_revealed_after_open_and_hidden_on_close() {
        let mut scheduler = ManualScheduler::new(Instant::now());
        let mut marker = Marker::new(Density(1.0), Px(12), Px(20), Color::WHITE, Color::TEAL);
        marker.set_label("42".to_string());

        assert_eq!(marker.animate_open(&mut scheduler), None);
        assert!(!marker.is_label_visible());
        let mut completed = None;
        for _ in 0..40 {
            for token in scheduler.advance(Duration::from_millis(16)) {
                if let MarkerUpdate::Completed(t) = marker.on_frame(&mut scheduler, token) {
                    completed = Some(t);
                }
            }
        }
        assert_eq!(completed, Some(MarkerTransition::Opened));
        assert!(marker.is_label_visible());
        assert_eq!(marker.drawable().scale(), 1.0);

        // Re-opening an open marker completes synchronously.
        assert_eq!(marker.animate_open(&mut scheduler), Some(MarkerTransition::Opened));

        assert_eq!(marker.animate_close(&mut scheduler), None);
        assert!(!marker.is_label_visible());
    }

    #[test]
    fn test_measured_size_includes_diagonal_and_separation() {
        struct FixedMeasure;
        impl TextMeasurer for FixedMeasure {
            fn measure_text(&self, _text: &str) -> PxSize {
                PxSize::new(Px(20), Px(14))
            }
        }

        let mut marker = Marker::new(Density(1.0), Px(12), Px(27), Color::WHITE, Color::TEAL);
        marker.reset_sizes(&FixedMeasure, "100");
        // Label side: 20 + 2 * 8 = 36; diagonal overhang (50.76 - 36) / 2 = 7.
        assert_eq!(marker.measured_size(), PxSize::new(Px(52), Px(52 + 7 + 27)));

        marker.set_float_offset(Px(100));
        assert_eq!(marker.left(), Px(74));
        assert_eq!(marker.drawable().bounds().left, Px(82));
    }
}
