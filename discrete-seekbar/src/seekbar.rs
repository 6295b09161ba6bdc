//! The discrete seek bar control.
//!
//! [`DiscreteSeekBar`] owns the value, the drag session and every drawable.
//! The host feeds it input ([`on_pointer`](DiscreteSeekBar::on_pointer),
//! [`on_key`](DiscreteSeekBar::on_key)), frame tokens
//! ([`on_frame`](DiscreteSeekBar::on_frame)) and size changes, and asks it to
//! paint itself and its indicator overlay.
//!
//! # Example
//!
//! ```
//! use discrete_seekbar::{
//!     DiscreteSeekBar, PointerEvent, Px, PxPosition, PxSize, SeekBarArgs,
//!     headless::HeadlessHost,
//! };
//!
//! let mut host = HeadlessHost::new();
//! let mut bar = DiscreteSeekBar::new(SeekBarArgs::default().value(50), &mut host);
//! bar.layout(&mut host, PxSize::new(Px(232), bar.measured_height()));
//!
//! let y = bar.thumb().bounds().center_y();
//! bar.on_pointer(&mut host, PointerEvent::Down(PxPosition::new(Px(116), y)));
//! bar.on_pointer(&mut host, PointerEvent::Move(PxPosition::new(Px(166), y)));
//! assert_eq!(bar.value(), 75);
//! ```

use std::{fmt, time::Duration};

use derive_setters::Setters;

use crate::{
    animation::{DEFAULT_DURATION, DurationScaling, TimedAnimation},
    color::{Color, StateColors},
    dp::{Density, Dp},
    drag::{DragConfig, DragController, DragTarget, PointerEvent},
    error::SeekBarError,
    format::{NumericTransformer, ValueFormatter},
    geometry::{Range, ValueGeometry},
    host::{SeekBarHost, Surface},
    indicator::{IndicatorController, IndicatorVisibility},
    layout::{Padding, TrackLayout, TrackMetrics},
    marker::{MarkerAnimationListener, MarkerUpdate},
    px::{Px, PxPosition, PxRect, PxSize},
    ripple::{Ripple, RippleEffect},
    scheduler::{AnimationChannel, DelayedCallback, FrameScheduler, FrameToken},
    state::InteractionState,
    thumb::ThumbDrawable,
};

/// Delay before the indicator appears after a press or focus, so plain taps
/// do not flash it.
pub const INDICATOR_SHOW_DELAY: Duration = Duration::from_millis(150);

/// Keyboard steps that take the thumb from one end to the other at most.
const MAX_KEY_STEPS: i64 = 20;

/// Arguments for [`DiscreteSeekBar::new`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct SeekBarArgs {
    /// Lower bound of the range.
    pub min: i32,
    /// Upper bound of the range. Pushed to `min + 1` if not above `min`.
    pub max: i32,
    /// Initial value, clamped into the range.
    pub value: i32,
    /// Whether pressing the track away from the thumb jumps the thumb there.
    pub track_click_enabled: bool,
    /// Whether the floating indicator is shown while interacting.
    pub indicator_enabled: bool,
    /// Whether the value direction follows a right-to-left layout.
    pub mirror_for_rtl: bool,
    /// Whether the host lays the control out right to left.
    pub layout_rtl: bool,
    /// Value change per arrow key press. Adjusted so the whole range takes
    /// at most 20 presses.
    pub key_step_increment: i32,
    /// Label formatter.
    #[setters(into)]
    pub formatter: ValueFormatter,
    /// Maps values before they are formatted.
    pub transformer: NumericTransformer,
    /// Physical pixels per dp.
    pub density: Density,
    /// Padding around the track, in pixels.
    pub padding: Padding,
    /// Thumb diameter.
    pub thumb_size: Dp,
    /// Height of the background track.
    pub track_height: Dp,
    /// Height of the filled scrubber.
    pub scrubber_height: Dp,
    /// Minimum side of the thumb's touch area.
    pub min_touch_target: Dp,
    /// Gap between the indicator tip and the thumb.
    pub indicator_separation: Dp,
    /// Horizontal movement that turns a press into a drag.
    pub touch_slop: Dp,
    /// Colors of the background track.
    #[setters(into)]
    pub track_colors: StateColors,
    /// Colors of the scrubber and thumb.
    #[setters(into)]
    pub progress_colors: StateColors,
    /// Colors of the press ripple.
    #[setters(into)]
    pub ripple_colors: StateColors,
    /// Indicator bubble colors: pressed when open, default otherwise.
    #[setters(into)]
    pub indicator_colors: StateColors,
    /// Label color inside the indicator.
    pub indicator_text_color: Color,
    /// Whether the host renders ripples itself.
    pub native_ripple: bool,
    /// Disables input.
    pub disabled: bool,
}

impl Default for SeekBarArgs {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            value: 0,
            track_click_enabled: true,
            indicator_enabled: true,
            mirror_for_rtl: false,
            layout_rtl: false,
            key_step_increment: 1,
            formatter: ValueFormatter::default(),
            transformer: NumericTransformer::default(),
            density: Density::BASELINE,
            padding: Padding::default(),
            thumb_size: Dp(12.0),
            track_height: Dp(1.0),
            scrubber_height: Dp(4.0),
            min_touch_target: Dp(32.0),
            indicator_separation: Dp(5.0),
            touch_slop: Dp(16.0),
            track_colors: StateColors::single(Color::GRAY),
            progress_colors: StateColors::single(Color::TEAL),
            ripple_colors: StateColors::single(Color::DARK_GRAY),
            indicator_colors: StateColors::single(Color::TEAL),
            indicator_text_color: Color::WHITE,
            native_ripple: false,
            disabled: false,
        }
    }
}

/// Receives the control's notifications. Every method defaults to a no-op.
pub trait SeekBarListener {
    /// The value changed, either from input or from a programmatic set.
    fn on_value_changed(&mut self, _value: i32, _from_user: bool) {}

    /// A drag session began.
    fn on_drag_started(&mut self) {}

    /// A drag session ended.
    fn on_drag_stopped(&mut self) {}

    /// The indicator started to open.
    fn on_indicator_shown(&mut self) {}

    /// The indicator started to close.
    fn on_indicator_hidden(&mut self) {}
}

/// Arrow keys understood by [`DiscreteSeekBar::on_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Decrease the value.
    Left,
    /// Increase the value.
    Right,
}

const STATE_LEN: usize = 12;

/// Persisted part of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState {
    /// Current value.
    pub value: i32,
    /// Upper bound.
    pub max: i32,
    /// Lower bound.
    pub min: i32,
}

impl SavedState {
    /// Size of the encoded record.
    pub const ENCODED_LEN: usize = STATE_LEN;

    /// Encodes as three big-endian `i32`: value, max, min.
    pub fn to_bytes(&self) -> [u8; STATE_LEN] {
        let mut out = [0; STATE_LEN];
        out[0..4].copy_from_slice(&self.value.to_be_bytes());
        out[4..8].copy_from_slice(&self.max.to_be_bytes());
        out[8..12].copy_from_slice(&self.min.to_be_bytes());
        out
    }

    /// Decodes a record written by [`to_bytes`](Self::to_bytes). Trailing
    /// bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SeekBarError> {
        let Some(record) = bytes.first_chunk::<STATE_LEN>() else {
            return Err(SeekBarError::TruncatedState {
                expected: STATE_LEN,
                actual: bytes.len(),
            });
        };
        let word = |at: usize| {
            i32::from_be_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
        };
        Ok(Self {
            value: word(0),
            max: word(4),
            min: word(8),
        })
    }
}

/// An integer slider with a floating value indicator.
pub struct DiscreteSeekBar {
    range: Range,
    value: i32,
    key_step: i32,
    track_click_enabled: bool,
    indicator_enabled: bool,
    mirror_for_rtl: bool,
    layout_rtl: bool,
    formatter: ValueFormatter,
    transformer: NumericTransformer,
    metrics: TrackMetrics,
    padding: Padding,
    layout: TrackLayout,
    touch_slop: Px,
    state: InteractionState,
    track_colors: StateColors,
    scrubber_colors: StateColors,
    thumb: ThumbDrawable,
    ripple: Ripple,
    indicator: IndicatorController,
    drag: DragController,
    position: TimedAnimation,
    animation_target: i32,
    show_indicator: DelayedCallback,
    listener: Option<Box<dyn SeekBarListener>>,
}

impl fmt::Debug for DiscreteSeekBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscreteSeekBar")
            .field("range", &self.range)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("indicator", &self.indicator.visibility())
            .finish_non_exhaustive()
    }
}

impl DiscreteSeekBar {
    /// Creates the control. The host is used to measure the indicator label.
    pub fn new<H: SeekBarHost + ?Sized>(args: SeekBarArgs, host: &mut H) -> Self {
        let density = args.density;
        let metrics = TrackMetrics::resolve(
            density,
            args.thumb_size,
            args.min_touch_target,
            args.track_height,
            args.scrubber_height,
        );
        let separation = args.indicator_separation.to_px(density);
        let range = Range::new(args.min, args.max);
        let value = range.clamp(args.value);

        let mut indicator = IndicatorController::new(
            density,
            metrics.thumb_size,
            metrics.thumb_size + metrics.touch_padding + separation,
            args.indicator_colors.pressed_color(),
            args.progress_colors.pressed_color(),
        );
        indicator.set_text_color(args.indicator_text_color);

        let mut bar = Self {
            range,
            value,
            key_step: args.key_step_increment,
            track_click_enabled: args.track_click_enabled,
            indicator_enabled: args.indicator_enabled,
            mirror_for_rtl: args.mirror_for_rtl,
            layout_rtl: args.layout_rtl,
            formatter: args.formatter,
            transformer: args.transformer,
            metrics,
            padding: args.padding,
            layout: TrackLayout::new(PxSize::ZERO, args.padding, metrics),
            touch_slop: args.touch_slop.to_px(density),
            state: InteractionState {
                enabled: !args.disabled,
                ..InteractionState::default()
            },
            track_colors: args.track_colors,
            scrubber_colors: args.progress_colors,
            thumb: ThumbDrawable::new(metrics.thumb_size, args.progress_colors),
            ripple: Ripple::new(args.native_ripple, args.ripple_colors),
            indicator,
            drag: DragController::default(),
            position: TimedAnimation::new(
                AnimationChannel::Position,
                value as f32,
                DEFAULT_DURATION,
                DurationScaling::Remaining,
            ),
            animation_target: value,
            show_indicator: DelayedCallback::new(AnimationChannel::ShowIndicator),
            listener: None,
        };
        bar.update_key_step();
        bar.update_indicator_sizes(host);
        bar.update_label();
        bar.thumb.set_state(bar.state);
        bar.ripple.set_state(host, bar.state);
        bar.update_thumb_from_value(host);
        tracing::debug!(min = range.min(), max = range.max(), value, "seek bar created");
        bar
    }

    /// Installs the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl SeekBarListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> i32 {
        self.range.min()
    }

    /// Upper bound.
    pub fn max(&self) -> i32 {
        self.range.max()
    }

    /// Value range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Effective keyboard step.
    pub fn key_step_increment(&self) -> i32 {
        self.key_step
    }

    /// Whether values run right to left.
    pub fn is_rtl(&self) -> bool {
        self.layout_rtl && self.mirror_for_rtl
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether an animated value transition is in flight.
    pub fn is_animation_running(&self) -> bool {
        self.position.is_running()
    }

    /// Interaction flags.
    pub fn interaction_state(&self) -> InteractionState {
        self.state
    }

    /// Track geometry for the current size.
    pub fn track_layout(&self) -> &TrackLayout {
        &self.layout
    }

    /// The thumb drawable.
    pub fn thumb(&self) -> &ThumbDrawable {
        &self.thumb
    }

    /// The ripple drawable.
    pub fn ripple(&self) -> &Ripple {
        &self.ripple
    }

    /// The indicator.
    pub fn indicator(&self) -> &IndicatorController {
        &self.indicator
    }

    /// Text the indicator shows for the current value.
    pub fn label(&self) -> &str {
        self.indicator.marker().label()
    }

    /// Height the control wants for its current configuration.
    pub fn measured_height(&self) -> Px {
        TrackLayout::measured_height(self.metrics, self.padding)
    }

    /// Sets the lower bound, pushing `max` up if needed.
    pub fn set_min<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, min: i32) {
        self.range.set_min(min);
        self.on_range_changed(host);
    }

    /// Sets the upper bound, pushing `min` down if needed.
    pub fn set_max<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, max: i32) {
        self.range.set_max(max);
        self.on_range_changed(host);
    }

    /// Sets the value without animation. Cancels a running value animation.
    ///
    /// Listeners hear about it with `from_user == false`, and only if the
    /// clamped value differs from the current one.
    pub fn set_value<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, value: i32) {
        self.update_value(host, value, false);
    }

    /// Sets the keyboard step, subject to the same adjustment as at
    /// construction.
    pub fn set_key_step_increment(&mut self, step: i32) {
        self.key_step = step;
        self.update_key_step();
    }

    /// Replaces the label formatter.
    pub fn set_formatter<H: SeekBarHost + ?Sized>(
        &mut self,
        host: &mut H,
        formatter: impl Into<ValueFormatter>,
    ) {
        self.formatter = formatter.into();
        self.update_indicator_sizes(host);
        self.update_label();
    }

    /// Replaces the numeric transformer.
    pub fn set_transformer<H: SeekBarHost + ?Sized>(
        &mut self,
        host: &mut H,
        transformer: NumericTransformer,
    ) {
        self.transformer = transformer;
        self.update_indicator_sizes(host);
        self.update_label();
    }

    /// Enables or disables track clicks.
    pub fn set_track_click_enabled(&mut self, enabled: bool) {
        self.track_click_enabled = enabled;
    }

    /// Enables or disables the floating indicator. Disabling hides it.
    pub fn set_indicator_enabled<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, enabled: bool) {
        self.indicator_enabled = enabled;
        if !enabled {
            self.hide_floater(host);
        }
    }

    /// Sets whether values follow a right-to-left layout.
    pub fn set_mirror_for_rtl<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, mirror: bool) {
        self.mirror_for_rtl = mirror;
        self.update_thumb_from_value(host);
    }

    /// Tells the control its layout direction.
    pub fn set_layout_rtl<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, rtl: bool) {
        self.layout_rtl = rtl;
        self.update_thumb_from_value(host);
    }

    /// Thumb colors. The indicator morphs from the thumb's pressed color to
    /// `indicator_color`.
    pub fn set_thumb_color(&mut self, colors: impl Into<StateColors>, indicator_color: Color) {
        let colors = colors.into();
        self.thumb.set_colors(colors);
        self.indicator
            .set_colors(indicator_color, colors.pressed_color());
    }

    /// Colors of the filled part of the track.
    pub fn set_scrubber_colors(&mut self, colors: impl Into<StateColors>) {
        self.scrubber_colors = colors.into();
    }

    /// Colors of the background track.
    pub fn set_track_colors(&mut self, colors: impl Into<StateColors>) {
        self.track_colors = colors.into();
    }

    /// Colors of the press ripple.
    pub fn set_ripple_colors(&mut self, colors: impl Into<StateColors>) {
        self.ripple.set_colors(colors.into());
    }

    /// Label color inside the indicator.
    pub fn set_indicator_text_color(&mut self, color: Color) {
        self.indicator.set_text_color(color);
    }

    /// Enables or disables input. Disabling ends an active drag.
    pub fn set_enabled<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, enabled: bool) {
        if self.state.enabled == enabled {
            return;
        }
        if !enabled {
            let mut drag = self.drag;
            let mut session = DragSession {
                bar: &mut *self,
                host: &mut *host,
            };
            drag.reset(&mut session);
            self.drag = drag;
        }
        self.state.enabled = enabled;
        self.update_from_state(host);
    }

    /// Input focus changed.
    pub fn set_focused<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, focused: bool) {
        if self.state.focused == focused {
            return;
        }
        self.state.focused = focused;
        self.update_from_state(host);
    }

    /// Changes the padding around the track and lays out again.
    pub fn set_padding<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, padding: Padding) {
        self.padding = padding;
        let size = self.layout.size();
        self.apply_layout(host, size);
    }

    /// Lays the control out at `size`.
    ///
    /// A real change dismisses the indicator at once and cancels a pending
    /// show; it comes back after the usual delay if the control is still
    /// pressed or focused.
    pub fn layout<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, size: PxSize) {
        if self.layout.size() == size {
            return;
        }
        self.apply_layout(host, size);
    }

    /// Handles a pointer event. Returns `false` if the control is disabled.
    pub fn on_pointer<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, event: PointerEvent) -> bool {
        if !self.state.enabled {
            return false;
        }
        let config = DragConfig {
            touch_padding: self.metrics.touch_padding,
            touch_slop: self.touch_slop,
            track_click_enabled: self.track_click_enabled,
        };
        let mut drag = self.drag;
        let mut session = DragSession {
            bar: &mut *self,
            host: &mut *host,
        };
        drag.on_pointer(event, &config, &mut session);
        self.drag = drag;
        true
    }

    /// Handles an arrow key. Returns `false` if the control is disabled.
    ///
    /// Steps are taken from the animation target when a transition is in
    /// flight, so repeated presses accumulate.
    pub fn on_key<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, key: Key) -> bool {
        if !self.state.enabled {
            return false;
        }
        let current = self.animated_value();
        match key {
            Key::Left if current > self.range.min() => {
                self.animate_value_to(host, current.saturating_sub(self.key_step));
            }
            Key::Right if current < self.range.max() => {
                self.animate_value_to(host, current.saturating_add(self.key_step));
            }
            _ => {}
        }
        true
    }

    /// Processes a frame token. Returns `true` if it belonged to this
    /// control and was still current.
    pub fn on_frame<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, token: FrameToken) -> bool {
        match token.channel {
            AnimationChannel::Position => match self.position.tick(host, token) {
                Some(frame) => {
                    self.apply_animation_position(host, frame.value);
                    if frame.finished {
                        tracing::debug!(value = self.value, "value animation finished");
                    }
                    true
                }
                None => false,
            },
            AnimationChannel::Ripple => {
                let redraw = self.ripple.on_frame(host, token);
                if redraw {
                    host.invalidate(self.touch_bounds());
                }
                redraw
            }
            AnimationChannel::Marker => match self.indicator.on_frame(host, token) {
                MarkerUpdate::Ignored => false,
                MarkerUpdate::Redraw => true,
                MarkerUpdate::Completed(done) => {
                    done.notify(self, host);
                    host.invalidate(self.touch_bounds());
                    true
                }
            },
            AnimationChannel::ThumbOpen => {
                let changed = self.thumb.on_frame(token);
                if changed {
                    host.invalidate(self.touch_bounds());
                }
                changed
            }
            AnimationChannel::ShowIndicator => {
                let due = self.show_indicator.accept(token);
                if due {
                    self.show_floater(host);
                }
                due
            }
        }
    }

    /// Snapshot of value and range.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            value: self.value,
            max: self.range.max(),
            min: self.range.min(),
        }
    }

    /// Applies a snapshot: min, then max, then value.
    pub fn restore_state<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, state: SavedState) {
        self.set_min(host, state.min);
        self.set_max(host, state.max);
        self.update_value(host, state.value, false);
    }

    /// Tears the control down: cancels every pending callback and removes
    /// the indicator overlay.
    pub fn detach<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        self.show_indicator.cancel(host);
        self.position.cancel(host);
        self.ripple.stop(host);
        self.thumb.animate_to_normal(host);
        self.force_dismiss(host);
        tracing::debug!("seek bar detached");
    }

    /// Paints ripple, track, scrubber and thumb in control coordinates.
    pub fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        self.ripple.draw(surface);
        surface.draw_rect(self.layout.track_rect(), self.track_colors.resolve(self.state));
        let center = self.thumb.bounds().center_x();
        surface.draw_rect(
            self.layout.scrubber_rect(center, self.is_rtl()),
            self.scrubber_colors.resolve(self.state),
        );
        self.thumb.draw(surface);
    }

    /// Paints the indicator in overlay coordinates.
    pub fn draw_indicator<D: Surface + ?Sized>(&self, surface: &mut D) {
        self.indicator.draw(surface);
    }

    fn geometry(&self) -> ValueGeometry {
        ValueGeometry::new(self.range)
    }

    fn touch_bounds(&self) -> PxRect {
        self.layout.touch_bounds(self.thumb.bounds())
    }

    fn animated_value(&self) -> i32 {
        if self.position.is_running() {
            self.animation_target
        } else {
            self.value
        }
    }

    fn with_listener(&mut self, notify: impl FnOnce(&mut dyn SeekBarListener)) {
        if let Some(listener) = self.listener.as_deref_mut() {
            notify(listener);
        }
    }

    fn update_value<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, value: i32, from_user: bool) {
        let value = self.range.clamp(value);
        let was_animating = self.position.is_running();
        self.position.cancel(host);
        if self.value == value {
            if was_animating {
                self.update_thumb_from_value(host);
            }
            return;
        }
        self.value = value;
        tracing::trace!(value, from_user, "value changed");
        self.with_listener(|l| l.on_value_changed(value, from_user));
        self.update_label();
        self.update_thumb_from_value(host);
    }

    fn on_range_changed<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        self.update_key_step();
        if !self.range.contains(self.value) {
            let min = self.range.min();
            self.update_value(host, min, false);
        } else {
            self.update_thumb_from_value(host);
        }
        self.update_indicator_sizes(host);
    }

    fn update_key_step(&mut self) {
        let span = self.range.span();
        if self.key_step <= 0 || span / self.key_step as i64 > MAX_KEY_STEPS {
            let step = (span as f64 / MAX_KEY_STEPS as f64).round().max(1.0);
            self.key_step = step.min(i32::MAX as f64) as i32;
            tracing::debug!(step = self.key_step, "keyboard step adjusted");
        }
    }

    fn label_for(&self, value: i32) -> String {
        self.transformer.label(&self.formatter, value)
    }

    fn update_label(&mut self) {
        let label = self.label_for(self.value);
        self.indicator.set_value(label);
    }

    /// Resizes the bubble for the widest label. A visible indicator is
    /// taken down first and comes back after the usual delay.
    fn update_indicator_sizes<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        let max_label = self.label_for(self.range.max());
        self.take_down_indicator(host);
        self.indicator.update_sizes(host, &max_label);
        if self.state.is_active() && self.indicator_enabled {
            self.show_indicator.post(host, INDICATOR_SHOW_DELAY);
        }
    }

    fn animate_value_to<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, target: i32) {
        let from = if self.position.is_running() {
            self.position.value()
        } else {
            self.value as f32
        };
        let target = self.range.clamp(target);
        self.animation_target = target;
        tracing::debug!(from, target, "animating value");
        if let Some(frame) = self.position.start(host, from, target as f32) {
            self.apply_animation_position(host, frame.value);
        }
    }

    fn apply_animation_position<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, position: f32) {
        let value = self.range.value_at(self.range.scale_of(position));
        if value != self.value {
            self.value = value;
            self.with_listener(|l| l.on_value_changed(value, true));
            self.update_label();
        }
        let offset =
            self.geometry()
                .position_to_offset(position, self.layout.track_length(), self.is_rtl());
        self.update_thumb_pos(host, offset);
    }

    fn update_thumb_from_value<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        let offset =
            self.geometry()
                .value_to_offset(self.value, self.layout.track_length(), self.is_rtl());
        self.update_thumb_pos(host, offset);
    }

    fn update_thumb_pos<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, offset: Px) {
        let old = self.touch_bounds();
        let thumb = self.layout.thumb_rect(self.layout.center_for_offset(offset));
        self.thumb.set_bounds(thumb);
        self.indicator.move_to(host, thumb.center_x());
        let touch = self.touch_bounds();
        self.ripple.set_hotspot_bounds(touch);
        host.invalidate(old.union(&touch));
    }

    fn drag_thumb_to<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, center_x: Px) {
        let offset = self.layout.offset_for_center(center_x);
        let value =
            self.geometry()
                .offset_to_value(offset, self.layout.track_length(), self.is_rtl());
        self.update_value(host, value, true);
    }

    fn set_pressed<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, pressed: bool) {
        if self.state.pressed != pressed {
            self.state.pressed = pressed;
            self.update_from_state(host);
        }
    }

    fn update_from_state<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        if self.state.is_active() && self.indicator_enabled {
            self.show_indicator.post(host, INDICATOR_SHOW_DELAY);
        } else {
            self.hide_floater(host);
        }
        self.thumb.set_state(self.state);
        self.ripple.set_state(host, self.state);
        host.invalidate(PxRect::from_origin_size(PxPosition::ZERO, self.layout.size()));
    }

    fn show_floater<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        self.thumb.animate_to_pressed(host);
        if let Some(done) = self.indicator.show(host, self.thumb.bounds()) {
            done.notify(self, host);
        }
        self.with_listener(|l| l.on_indicator_shown());
    }

    fn hide_floater<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        self.show_indicator.cancel(host);
        let was_open = self.is_indicator_open();
        if let Some(done) = self.indicator.dismiss(host) {
            done.notify(self, host);
        }
        if was_open {
            self.with_listener(|l| l.on_indicator_hidden());
        }
    }

    fn force_dismiss<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        let was_open = self.is_indicator_open();
        self.indicator.dismiss_immediately(host);
        if was_open {
            self.with_listener(|l| l.on_indicator_hidden());
        }
    }

    fn is_indicator_open(&self) -> bool {
        matches!(
            self.indicator.visibility(),
            IndicatorVisibility::Opening | IndicatorVisibility::Shown
        )
    }

    fn apply_layout<H: SeekBarHost + ?Sized>(&mut self, host: &mut H, size: PxSize) {
        self.layout = TrackLayout::new(size, self.padding, self.metrics);
        tracing::debug!(
            width = size.width.0,
            height = size.height.0,
            track = self.layout.track_length().0,
            "seek bar laid out"
        );
        self.take_down_indicator(host);
        self.update_from_state(host);
        self.update_thumb_from_value(host);
    }

    fn take_down_indicator<H: SeekBarHost + ?Sized>(&mut self, host: &mut H) {
        self.show_indicator.cancel(host);
        self.thumb.animate_to_normal(host);
        self.force_dismiss(host);
    }
}

impl MarkerAnimationListener for DiscreteSeekBar {
    fn on_opening_complete<S: FrameScheduler + ?Sized>(&mut self, _scheduler: &mut S) {}

    fn on_closing_complete<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.thumb.animate_to_normal(scheduler);
    }
}

/// The control and its host, seen by the drag state machine.
struct DragSession<'a, H: ?Sized> {
    bar: &'a mut DiscreteSeekBar,
    host: &'a mut H,
}

impl<H: SeekBarHost + ?Sized> DragTarget for DragSession<'_, H> {
    fn thumb_bounds(&self) -> PxRect {
        self.bar.thumb.bounds()
    }

    fn in_scrolling_container(&self) -> bool {
        self.host.is_in_scrolling_container()
    }

    fn drag_thumb_to(&mut self, center_x: Px) {
        self.bar.drag_thumb_to(&mut *self.host, center_x);
    }

    fn set_hotspot(&mut self, at: PxPosition) {
        self.bar.ripple.set_hotspot(at);
    }

    fn drag_started(&mut self) {
        self.host.claim_exclusive();
        self.bar.set_pressed(&mut *self.host, true);
        self.bar.with_listener(|l| l.on_drag_started());
    }

    fn drag_stopped(&mut self) {
        self.bar.with_listener(|l| l.on_drag_stopped());
        self.bar.set_pressed(&mut *self.host, false);
    }
}
