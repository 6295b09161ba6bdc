//! Frame scheduling capability.
//!
//! The seek bar never blocks and never spawns threads. Every animation step
//! and every delayed action is a [`FrameToken`] handed to the host's
//! [`FrameScheduler`]; when the deadline passes the host gives the token back
//! through [`DiscreteSeekBar::on_frame`](crate::seekbar::DiscreteSeekBar::on_frame).
//!
//! Tokens carry a generation. Owners bump the generation whenever they cancel
//! or restart, so a token that was already dequeued by the host when the
//! cancel happened is recognised as stale and dropped.

use std::time::Duration;

#[cfg(not(target_family = "wasm"))]
pub use std::time::Instant;
#[cfg(target_family = "wasm")]
pub use web_time::Instant;

/// Target cadence of animation ticks (1000 / 60 ms).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 60);

/// Identifies which part of the control a scheduled callback belongs to.
///
/// A control has at most one pending callback per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationChannel {
    /// Animated value transition (keyboard steps).
    Position,
    /// Manual ripple scale animation.
    Ripple,
    /// Indicator morph animation.
    Marker,
    /// Delayed hand-off that hides the thumb under the opened indicator.
    ThumbOpen,
    /// Delayed indicator show after a press or focus.
    ShowIndicator,
}

/// A scheduled callback: channel plus the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    /// Owner of the callback.
    pub channel: AnimationChannel,
    /// Generation of the owner when the callback was scheduled.
    pub generation: u64,
}

/// Host facility that runs callbacks at or after a deadline.
///
/// Implementations must be cooperative and single threaded: tokens are handed
/// back one at a time on the UI thread, never before their deadline.
pub trait FrameScheduler {
    /// Current time of the host clock.
    fn now(&self) -> Instant;

    /// Schedules `token` to be delivered at or after `at`.
    ///
    /// Replaces any callback still pending on the same channel.
    fn schedule(&mut self, token: FrameToken, at: Instant);

    /// Removes the pending callback of `channel`, if any.
    fn cancel(&mut self, channel: AnimationChannel);
}

/// A one-shot delayed action with a stale-delivery guard.
#[derive(Debug, Clone)]
pub(crate) struct DelayedCallback {
    channel: AnimationChannel,
    generation: u64,
    pending: bool,
}

impl DelayedCallback {
    pub(crate) fn new(channel: AnimationChannel) -> Self {
        Self {
            channel,
            generation: 0,
            pending: false,
        }
    }

    /// Posts the action `delay` from now, replacing an earlier post.
    pub(crate) fn post<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, delay: Duration) {
        self.generation += 1;
        self.pending = true;
        let at = scheduler.now() + delay;
        scheduler.schedule(
            FrameToken {
                channel: self.channel,
                generation: self.generation,
            },
            at,
        );
    }

    /// Cancels the pending action. Harmless when nothing is pending.
    pub(crate) fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.pending {
            self.pending = false;
            self.generation += 1;
            scheduler.cancel(self.channel);
        }
    }

    /// Consumes a delivered token. Returns `true` if the action should run.
    pub(crate) fn accept(&mut self, token: FrameToken) -> bool {
        if token.channel != self.channel || token.generation != self.generation || !self.pending {
            tracing::trace!(?token, "discarding stale delayed callback");
            return false;
        }
        self.pending = false;
        true
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }
}
