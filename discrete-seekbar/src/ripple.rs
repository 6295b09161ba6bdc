//! Press feedback behind the thumb.
//!
//! Hosts with a native ripple implementation render it themselves; the core
//! only feeds it state and hotspot ([`NativeRipple`]). Everywhere else the
//! core draws an approximation with its own animation ([`ManualRipple`]).
//! [`Ripple`] picks one of the two once, from the host's capability flag.

use crate::{
    animation::{DEFAULT_DURATION, DurationScaling, TimedAnimation},
    color::{Color, StateColors},
    host::Surface,
    px::{Px, PxPosition, PxRect},
    scheduler::{AnimationChannel, FrameScheduler, FrameToken},
    state::InteractionState,
};

const RIPPLE_ALPHA: u8 = 130;
const BACKGROUND_ALPHA: u8 = 100;
const INACTIVE_SCALE: f32 = 0.0;
const ACTIVE_SCALE: f32 = 1.0;

/// Shared interface of the two ripple variants.
pub trait RippleEffect {
    /// Applies new interaction flags.
    fn set_state<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, state: InteractionState);

    /// Replaces the color list.
    fn set_colors(&mut self, colors: StateColors);

    /// Pointer position for effects that radiate from the touch point.
    fn set_hotspot(&mut self, at: PxPosition);

    /// Area the ripple covers: the thumb's touch bounds.
    fn set_hotspot_bounds(&mut self, bounds: PxRect);

    /// Processes a frame tick. Returns `true` when a repaint is needed.
    fn on_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, token: FrameToken) -> bool;

    /// Cancels any pending work.
    fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S);

    /// Paints the ripple if the core is responsible for it.
    fn draw<D: Surface + ?Sized>(&self, surface: &mut D);
}

/// Ripple drawn by the core: a filled circle scaling with the press.
#[derive(Debug, Clone)]
pub struct ManualRipple {
    pressed_color: Color,
    focused_color: Color,
    disabled_color: Color,
    ripple_color: Color,
    background_color: Color,
    scale: TimedAnimation,
    was_pressed: bool,
    bounds: PxRect,
}

impl ManualRipple {
    /// Creates an inactive ripple.
    pub fn new(colors: StateColors) -> Self {
        let mut ripple = Self {
            pressed_color: Color::TRANSPARENT,
            focused_color: Color::TRANSPARENT,
            disabled_color: Color::TRANSPARENT,
            ripple_color: Color::TRANSPARENT,
            background_color: Color::TRANSPARENT,
            scale: TimedAnimation::new(
                AnimationChannel::Ripple,
                INACTIVE_SCALE,
                DEFAULT_DURATION,
                DurationScaling::Span(ACTIVE_SCALE - INACTIVE_SCALE),
            ),
            was_pressed: false,
            bounds: PxRect::ZERO,
        };
        ripple.set_colors(colors);
        ripple
    }

    /// Current scale in `[0, 1]`.
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Whether the scale is animating.
    pub fn is_running(&self) -> bool {
        self.scale.is_running()
    }

    /// Color of the expanding circle.
    pub fn ripple_color(&self) -> Color {
        self.ripple_color
    }

    /// Color of the full-size background circle.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    fn animate_to_pressed<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.scale.cancel(scheduler);
        let current = self.scale.value();
        if current < ACTIVE_SCALE {
            self.scale.start(scheduler, current, ACTIVE_SCALE);
        }
    }

    fn animate_to_normal<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.scale.cancel(scheduler);
        let current = self.scale.value();
        if current > INACTIVE_SCALE {
            self.scale.start(scheduler, current, INACTIVE_SCALE);
        }
    }
}

impl RippleEffect for ManualRipple {
    fn set_state<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, state: InteractionState) {
        let was_pressed = std::mem::replace(&mut self.was_pressed, state.pressed);
        if !state.enabled {
            self.scale.jump_to(scheduler, ACTIVE_SCALE / 2.0);
            self.ripple_color = self.disabled_color;
            self.background_color = Color::TRANSPARENT;
        } else if state.pressed {
            self.animate_to_pressed(scheduler);
            self.ripple_color = self.pressed_color;
            self.background_color = self.pressed_color;
        } else if was_pressed {
            self.ripple_color = self.pressed_color;
            self.background_color = self.pressed_color;
            self.animate_to_normal(scheduler);
        } else if state.focused {
            self.scale.jump_to(scheduler, ACTIVE_SCALE);
            self.ripple_color = self.focused_color;
            self.background_color = Color::TRANSPARENT;
        } else {
            self.scale.jump_to(scheduler, INACTIVE_SCALE);
            self.ripple_color = Color::TRANSPARENT;
            self.background_color = Color::TRANSPARENT;
        }
    }

    fn set_colors(&mut self, colors: StateColors) {
        self.pressed_color = colors.pressed_color().modulate_alpha(RIPPLE_ALPHA);
        self.focused_color = colors.focused_color().modulate_alpha(RIPPLE_ALPHA);
        self.disabled_color = colors.default.modulate_alpha(RIPPLE_ALPHA);
    }

    fn set_hotspot(&mut self, _at: PxPosition) {}

    fn set_hotspot_bounds(&mut self, bounds: PxRect) {
        self.bounds = bounds;
    }

    fn on_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, token: FrameToken) -> bool {
        self.scale.tick(scheduler, token).is_some()
    }

    fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.scale.cancel(scheduler);
    }

    fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        let scale = self.scale.value();
        if scale <= INACTIVE_SCALE {
            return;
        }
        let size = self.bounds.width().min(self.bounds.height());
        let radius = size.half().to_f32();
        let center = [self.bounds.center_x().to_f32(), self.bounds.center_y().to_f32()];
        if !self.background_color.is_transparent() {
            surface.draw_circle(
                center,
                radius,
                self.background_color.modulate_alpha(BACKGROUND_ALPHA),
            );
        }
        if !self.ripple_color.is_transparent() {
            surface.draw_circle(center, radius * scale, self.ripple_color);
        }
    }
}

/// Ripple rendered by the host. The core records what the host needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeRipple {
    colors: StateColors,
    state: InteractionState,
    hotspot: PxPosition,
    hotspot_bounds: PxRect,
}

impl NativeRipple {
    /// Creates a native ripple proxy.
    pub fn new(colors: StateColors) -> Self {
        Self {
            colors,
            state: InteractionState::default(),
            hotspot: PxPosition::ZERO,
            hotspot_bounds: PxRect::ZERO,
        }
    }

    /// Colors the host should use.
    pub fn colors(&self) -> StateColors {
        self.colors
    }

    /// Last interaction flags.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Last pointer position.
    pub fn hotspot(&self) -> PxPosition {
        self.hotspot
    }

    /// Bounds the host ripple is confined to.
    pub fn hotspot_bounds(&self) -> PxRect {
        self.hotspot_bounds
    }
}

impl RippleEffect for NativeRipple {
    fn set_state<S: FrameScheduler + ?Sized>(&mut self, _scheduler: &mut S, state: InteractionState) {
        self.state = state;
    }

    fn set_colors(&mut self, colors: StateColors) {
        self.colors = colors;
    }

    fn set_hotspot(&mut self, at: PxPosition) {
        self.hotspot = at;
    }

    fn set_hotspot_bounds(&mut self, bounds: PxRect) {
        // A native ripple over the full touch area looks too big.
        let inset = Px(bounds.width().0 / 8);
        self.hotspot_bounds = bounds.inset(inset, inset);
    }

    fn on_frame<S: FrameScheduler + ?Sized>(&mut self, _scheduler: &mut S, _token: FrameToken) -> bool {
        false
    }

    fn stop<S: FrameScheduler + ?Sized>(&mut self, _scheduler: &mut S) {}

    fn draw<D: Surface + ?Sized>(&self, _surface: &mut D) {}
}

/// The ripple variant chosen for this control.
#[derive(Debug, Clone)]
pub enum Ripple {
    /// Drawn and animated by the core.
    Manual(ManualRipple),
    /// Drawn by the host.
    Native(NativeRipple),
}

impl Ripple {
    /// Selects the variant from the host capability flag.
    pub fn new(native_available: bool, colors: StateColors) -> Self {
        if native_available {
            Ripple::Native(NativeRipple::new(colors))
        } else {
            Ripple::Manual(ManualRipple::new(colors))
        }
    }

    /// The native proxy, if this is the native variant.
    pub fn as_native(&self) -> Option<&NativeRipple> {
        match self {
            Ripple::Native(native) => Some(native),
            Ripple::Manual(_) => None,
        }
    }

    /// The manual ripple, if this is the manual variant.
    pub fn as_manual(&self) -> Option<&ManualRipple> {
        match self {
            Ripple::Manual(manual) => Some(manual),
            Ripple::Native(_) => None,
        }
    }
}

impl RippleEffect for Ripple {
    fn set_state<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, state: InteractionState) {
        match self {
            Ripple::Manual(r) => r.set_state(scheduler, state),
            Ripple::Native(r) => r.set_state(scheduler, state),
        }
    }

    fn set_colors(&mut self, colors: StateColors) {
        match self {
            Ripple::Manual(r) => r.set_colors(colors),
            Ripple::Native(r) => r.set_colors(colors),
        }
    }

    fn set_hotspot(&mut self, at: PxPosition) {
        match self {
            Ripple::Manual(r) => r.set_hotspot(at),
            Ripple::Native(r) => r.set_hotspot(at),
        }
    }

    fn set_hotspot_bounds(&mut self, bounds: PxRect) {
        match self {
            Ripple::Manual(r) => r.set_hotspot_bounds(bounds),
            Ripple::Native(r) => r.set_hotspot_bounds(bounds),
        }
    }

    fn on_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, token: FrameToken) -> bool {
        match self {
            Ripple::Manual(r) => r.on_frame(scheduler, token),
            Ripple::Native(r) => r.on_frame(scheduler, token),
        }
    }

    fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        match self {
            Ripple::Manual(r) => r.stop(scheduler),
            Ripple::Native(r) => r.stop(scheduler),
        }
    }

    fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        match self {
            Ripple::Manual(r) => r.draw(surface),
            Ripple::Native(r) => r.draw(surface),
        }
    }
}
