//! The thumb: a filled circle that hides while the indicator is open.

use std::time::Duration;

use crate::{
    color::StateColors,
    host::Surface,
    px::{Px, PxRect},
    scheduler::{AnimationChannel, DelayedCallback, FrameScheduler, FrameToken},
    state::InteractionState,
};

/// Delay between the indicator starting to open and the thumb disappearing
/// beneath it.
pub const THUMB_OPEN_DELAY: Duration = Duration::from_millis(100);

/// Thumb drawable.
///
/// While the indicator is shown the marker morphs out of the thumb, so the
/// thumb itself stops painting ("open") shortly after the morph starts and
/// comes back once the marker has closed.
#[derive(Debug, Clone)]
pub struct ThumbDrawable {
    size: Px,
    colors: StateColors,
    state: InteractionState,
    bounds: PxRect,
    open: bool,
    opener: DelayedCallback,
}

impl ThumbDrawable {
    /// Creates a closed thumb of diameter `size`.
    pub fn new(size: Px, colors: StateColors) -> Self {
        Self {
            size,
            colors,
            state: InteractionState::default(),
            bounds: PxRect::ZERO,
            open: false,
            opener: DelayedCallback::new(AnimationChannel::ThumbOpen),
        }
    }

    /// Diameter of the thumb.
    pub fn size(&self) -> Px {
        self.size
    }

    /// Current rectangle.
    pub fn bounds(&self) -> PxRect {
        self.bounds
    }

    /// Moves the thumb.
    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.bounds = bounds;
    }

    /// Color list.
    pub fn colors(&self) -> StateColors {
        self.colors
    }

    /// Replaces the color list.
    pub fn set_colors(&mut self, colors: StateColors) {
        self.colors = colors;
    }

    /// Applies new interaction flags.
    pub fn set_state(&mut self, state: InteractionState) {
        self.state = state;
    }

    /// Whether the thumb is hidden under the indicator.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the hide is still pending.
    pub fn is_running(&self) -> bool {
        self.opener.is_pending()
    }

    /// Schedules the thumb to hide after [`THUMB_OPEN_DELAY`].
    pub fn animate_to_pressed<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.opener.post(scheduler, THUMB_OPEN_DELAY);
    }

    /// Shows the thumb again and drops a pending hide.
    pub fn animate_to_normal<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.open = false;
        self.opener.cancel(scheduler);
    }

    /// Processes a delivered token. Returns `true` when the thumb changed.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if self.opener.accept(token) {
            self.open = true;
            return true;
        }
        false
    }

    /// Paints the thumb unless it is open.
    pub fn draw<D: Surface + ?Sized>(&self, surface: &mut D) {
        if self.open {
            return;
        }
        surface.draw_circle(
            [self.bounds.center_x().to_f32(), self.bounds.center_y().to_f32()],
            self.size.half().to_f32(),
            self.colors.resolve(self.state),
        );
    }
}
