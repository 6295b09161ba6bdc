//! Time-driven scalar animation.
//!
//! [`TimedAnimation`] moves one `f32` from a start to an end value over wall
//! clock time. It does not own a timer: it asks the host
//! [`FrameScheduler`] for the next tick and turns each delivered
//! [`FrameToken`] into an [`AnimationFrame`] the owner applies to whatever the
//! value drives (a thumb position, a ripple radius, a morph factor).

use std::time::Duration;

use crate::scheduler::{AnimationChannel, FRAME_INTERVAL, FrameScheduler, FrameToken, Instant};

/// Duration used by every animation of the control.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Interpolation curve mapping linear time to eased progress.
///
/// Every curve satisfies `f(0) = 0`, `f(1) = 1`, is non-decreasing and is
/// symmetric about `t = 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Cosine ease: starts and ends slowly, fastest in the middle.
    #[default]
    AccelerateDecelerate,
    /// Cubic ease-in-out.
    CubicInOut,
    /// No easing.
    Linear,
}

impl Easing {
    /// Maps `progress` in `[0.0, 1.0]` to eased progress in `[0.0, 1.0]`.
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::AccelerateDecelerate => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Linear => t,
        }
    }
}

/// How a new start shortens the base duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationScaling {
    /// The value lives on a fixed span (for example `0.0..=1.0`). Every start
    /// runs for `base * |to - from| / span`, so resuming from halfway takes
    /// half the time.
    Span(f32),
    /// A fresh start runs for the full base duration. Superseding a running
    /// animation runs for `base * |to - current| / |to - superseded_start|`,
    /// never longer than the base duration.
    Remaining,
}

/// Snapshot of an in-flight (or finished) transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Value at the start of the transition.
    pub start_value: f32,
    /// Value the transition ends on.
    pub end_value: f32,
    /// When the transition started.
    pub start_time: Instant,
    /// Effective duration after scaling.
    pub duration: Duration,
    /// `true` when the transition moves toward smaller values.
    pub reverse: bool,
    /// Whether ticks are still expected.
    pub running: bool,
}

/// One emitted animation value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Interpolated value. Exactly the end value when `finished`.
    pub value: f32,
    /// Set on the last frame of a transition, once.
    pub finished: bool,
    /// Direction of the transition that produced this frame.
    pub reverse: bool,
}

/// Generic engine driving one scalar between two values.
///
/// At most one transition is active; starting another supersedes it,
/// continuing from the value the old one had reached.
#[derive(Debug, Clone)]
pub struct TimedAnimation {
    channel: AnimationChannel,
    easing: Easing,
    base_duration: Duration,
    scaling: DurationScaling,
    generation: u64,
    state: Option<AnimationState>,
    value: f32,
}

impl TimedAnimation {
    /// Creates an idle animation resting at `initial`.
    pub fn new(
        channel: AnimationChannel,
        initial: f32,
        base_duration: Duration,
        scaling: DurationScaling,
    ) -> Self {
        Self {
            channel,
            easing: Easing::default(),
            base_duration,
            scaling,
            generation: 0,
            state: None,
            value: initial,
        }
    }

    /// Replaces the interpolation curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Channel this animation schedules its ticks on.
    pub fn channel(&self) -> AnimationChannel {
        self.channel
    }

    /// Last emitted value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether a transition is in flight.
    pub fn is_running(&self) -> bool {
        self.state.is_some_and(|s| s.running)
    }

    /// End value of the current or last transition.
    pub fn target(&self) -> Option<f32> {
        self.state.map(|s| s.end_value)
    }

    /// Current or last transition.
    pub fn state(&self) -> Option<AnimationState> {
        self.state
    }

    /// Starts a transition from `from` to `to`.
    ///
    /// Returns the final frame right away when there is nothing to animate
    /// (zero effective duration or `from == to`); the transition is then
    /// already finished and no tick is scheduled.
    pub fn start<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        from: f32,
        to: f32,
    ) -> Option<AnimationFrame> {
        let superseded = self.state.filter(|s| s.running);
        let fraction = match self.scaling {
            DurationScaling::Span(span) if span > 0.0 => (to - from).abs() / span,
            DurationScaling::Span(_) => 1.0,
            DurationScaling::Remaining => match superseded {
                Some(old) => {
                    let full = (to - old.start_value).abs();
                    if full <= f32::EPSILON {
                        1.0
                    } else {
                        (to - from).abs() / full
                    }
                }
                None => 1.0,
            },
        }
        .clamp(0.0, 1.0);

        if superseded.is_some() {
            scheduler.cancel(self.channel);
        }
        self.generation += 1;

        let now = scheduler.now();
        let duration = self.base_duration.mul_f32(fraction);
        let reverse = to < from;
        self.value = from;

        if duration.is_zero() || from == to {
            self.state = Some(AnimationState {
                start_value: from,
                end_value: to,
                start_time: now,
                duration: Duration::ZERO,
                reverse,
                running: false,
            });
            self.value = to;
            tracing::trace!(channel = ?self.channel, to, "animation finished immediately");
            return Some(AnimationFrame {
                value: to,
                finished: true,
                reverse,
            });
        }

        self.state = Some(AnimationState {
            start_value: from,
            end_value: to,
            start_time: now,
            duration,
            reverse,
            running: true,
        });
        tracing::trace!(
            channel = ?self.channel,
            from,
            to,
            duration_ms = duration.as_millis() as u64,
            superseding = superseded.is_some(),
            "animation started"
        );
        scheduler.schedule(self.token(), now + FRAME_INTERVAL);
        None
    }

    /// Processes a delivered tick.
    ///
    /// Returns `None` for tokens that belong to another channel, to an older
    /// generation, or arrive after the transition ended.
    pub fn tick<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        token: FrameToken,
    ) -> Option<AnimationFrame> {
        let state = match self.state {
            Some(state) if state.running && token == self.token() => state,
            _ => {
                tracing::trace!(?token, "discarding stale animation tick");
                return None;
            }
        };

        let now = scheduler.now();
        let elapsed = now.saturating_duration_since(state.start_time);
        if elapsed < state.duration {
            let progress = self
                .easing
                .apply(elapsed.as_secs_f32() / state.duration.as_secs_f32());
            self.value = state.start_value + (state.end_value - state.start_value) * progress;
            scheduler.schedule(self.token(), now + FRAME_INTERVAL);
            Some(AnimationFrame {
                value: self.value,
                finished: false,
                reverse: state.reverse,
            })
        } else {
            self.state = Some(AnimationState {
                running: false,
                ..state
            });
            self.value = state.end_value;
            Some(AnimationFrame {
                value: state.end_value,
                finished: true,
                reverse: state.reverse,
            })
        }
    }

    /// Stops the transition where it is. Completion is not reported.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(state) = self.state.as_mut()
            && state.running
        {
            state.running = false;
            self.generation += 1;
            scheduler.cancel(self.channel);
            tracing::trace!(channel = ?self.channel, value = self.value, "animation cancelled");
        }
    }

    /// Cancels any transition and rests at `value`.
    pub fn jump_to<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, value: f32) {
        self.cancel(scheduler);
        self.value = value;
    }

    fn token(&self) -> FrameToken {
        FrameToken {
            channel: self.channel,
            generation: self.generation,
        }
    }
}
