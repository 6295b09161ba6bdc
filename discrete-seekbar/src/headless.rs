//! An in-memory host.
//!
//! Drives the control without a window system: a virtual clock stands in
//! for the frame scheduler, overlays are kept in a list and drawing is
//! recorded. Used by the demo binary and the test suites, and handy for
//! embedding the control's logic in a headless environment.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use lyon_path::Path;
use parking_lot::Mutex;

use crate::{
    color::Color,
    host::{
        GestureArbiter, Invalidator, OverlayHandle, OverlayHost, OverlayPlacement, Surface,
        TextMeasurer,
    },
    px::{Px, PxPosition, PxRect, PxSize},
    scheduler::{AnimationChannel, FRAME_INTERVAL, FrameScheduler, FrameToken, Instant},
    seekbar::{DiscreteSeekBar, SeekBarListener},
};

const GLYPH_WIDTH: i32 = 8;
const LINE_HEIGHT: i32 = 16;

fn measure(text: &str) -> PxSize {
    PxSize::new(
        Px(text.chars().count() as i32 * GLYPH_WIDTH),
        Px(LINE_HEIGHT),
    )
}

/// Frame scheduler on a virtual clock.
///
/// Time only moves through [`advance`](Self::advance), which returns the
/// tokens that fell due, earliest first.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now: Instant,
    pending: BTreeMap<AnimationChannel, (Instant, FrameToken)>,
}

impl ManualScheduler {
    /// Creates a scheduler whose clock starts at `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            now: start,
            pending: BTreeMap::new(),
        }
    }

    /// Moves the clock forward and takes every token due by then.
    pub fn advance(&mut self, step: Duration) -> Vec<FrameToken> {
        self.now += step;
        let now = self.now;
        let mut due: Vec<(Instant, FrameToken)> = Vec::new();
        self.pending.retain(|_, &mut (at, token)| {
            if at <= now {
                due.push((at, token));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, token)| (at, token.channel));
        due.into_iter().map(|(_, token)| token).collect()
    }

    /// Number of scheduled callbacks.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `channel` has a callback scheduled.
    pub fn is_pending(&self, channel: AnimationChannel) -> bool {
        self.pending.contains_key(&channel)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.now
    }

    fn schedule(&mut self, token: FrameToken, at: Instant) {
        self.pending.insert(token.channel, (at, token));
    }

    fn cancel(&mut self, channel: AnimationChannel) {
        self.pending.remove(&channel);
    }
}

/// A complete host kept in memory.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    scheduler: ManualScheduler,
    location: PxPosition,
    screen: PxSize,
    in_scrolling_container: bool,
    overlays: Vec<(OverlayHandle, OverlayPlacement)>,
    next_overlay: u64,
    overlay_repaints: usize,
    claims: usize,
    invalidations: Vec<PxRect>,
}

impl HeadlessHost {
    /// A 1080x1920 screen with the control at its origin.
    pub fn new() -> Self {
        Self {
            scheduler: ManualScheduler::default(),
            location: PxPosition::ZERO,
            screen: PxSize::new(Px(1080), Px(1920)),
            in_scrolling_container: false,
            overlays: Vec::new(),
            next_overlay: 1,
            overlay_repaints: 0,
            claims: 0,
            invalidations: Vec::new(),
        }
    }

    /// Replaces the screen size.
    pub fn with_screen_size(mut self, size: PxSize) -> Self {
        self.screen = size;
        self
    }

    /// Moves the control on screen.
    pub fn set_location_on_screen(&mut self, location: PxPosition) {
        self.location = location;
    }

    /// Pretends the control sits in a scrolling container.
    pub fn set_in_scrolling_container(&mut self, in_scrolling_container: bool) {
        self.in_scrolling_container = in_scrolling_container;
    }

    /// Attached overlays, oldest first.
    pub fn overlays(&self) -> &[(OverlayHandle, OverlayPlacement)] {
        &self.overlays
    }

    /// How many overlay repaints were requested.
    pub fn overlay_repaints(&self) -> usize {
        self.overlay_repaints
    }

    /// How many times exclusive gesture ownership was claimed.
    pub fn claim_count(&self) -> usize {
        self.claims
    }

    /// Repaint regions requested for the control, oldest first.
    pub fn invalidations(&self) -> &[PxRect] {
        &self.invalidations
    }

    /// Forgets recorded repaint regions.
    pub fn clear_invalidations(&mut self) {
        self.invalidations.clear();
    }

    /// The virtual clock.
    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    /// Moves the clock forward and takes every token due by then.
    pub fn advance(&mut self, step: Duration) -> Vec<FrameToken> {
        self.scheduler.advance(step)
    }

    /// Number of scheduled callbacks.
    pub fn pending_count(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Runs `bar` for `duration`, one frame interval at a time, delivering
    /// every token that falls due.
    pub fn run(&mut self, bar: &mut DiscreteSeekBar, duration: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            let step = FRAME_INTERVAL.min(duration - elapsed);
            elapsed += step;
            for token in self.advance(step) {
                bar.on_frame(self, token);
            }
        }
    }

    /// Runs `bar` until nothing is scheduled any more, giving up after
    /// `limit`.
    pub fn run_until_idle(&mut self, bar: &mut DiscreteSeekBar, limit: Duration) {
        let mut elapsed = Duration::ZERO;
        while self.pending_count() > 0 && elapsed < limit {
            elapsed += FRAME_INTERVAL;
            for token in self.advance(FRAME_INTERVAL) {
                bar.on_frame(self, token);
            }
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for HeadlessHost {
    fn now(&self) -> Instant {
        self.scheduler.now()
    }

    fn schedule(&mut self, token: FrameToken, at: Instant) {
        self.scheduler.schedule(token, at);
    }

    fn cancel(&mut self, channel: AnimationChannel) {
        self.scheduler.cancel(channel);
    }
}

impl OverlayHost for HeadlessHost {
    fn location_on_screen(&self) -> PxPosition {
        self.location
    }

    fn screen_size(&self) -> PxSize {
        self.screen
    }

    fn add_overlay(&mut self, placement: OverlayPlacement) -> OverlayHandle {
        let handle = OverlayHandle(self.next_overlay);
        self.next_overlay += 1;
        self.overlays.push((handle, placement));
        handle
    }

    fn remove_overlay_immediate(&mut self, handle: OverlayHandle) {
        self.overlays.retain(|(attached, _)| *attached != handle);
    }

    fn invalidate_overlay(&mut self, handle: OverlayHandle) {
        if self.overlays.iter().any(|(attached, _)| *attached == handle) {
            self.overlay_repaints += 1;
        }
    }
}

impl GestureArbiter for HeadlessHost {
    fn claim_exclusive(&mut self) {
        self.claims += 1;
    }

    fn is_in_scrolling_container(&self) -> bool {
        self.in_scrolling_container
    }
}

impl Invalidator for HeadlessHost {
    fn invalidate(&mut self, region: PxRect) {
        self.invalidations.push(region);
    }
}

impl TextMeasurer for HeadlessHost {
    fn measure_text(&self, text: &str) -> PxSize {
        measure(text)
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// [`Surface::draw_circle`].
    Circle {
        /// Center point.
        center: [f32; 2],
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// [`Surface::draw_rect`].
    Rect {
        /// Filled rectangle.
        rect: PxRect,
        /// Fill color.
        color: Color,
    },
    /// [`Surface::draw_path`].
    Path {
        /// Filled outline.
        path: Path,
        /// Fill color.
        color: Color,
    },
    /// [`Surface::draw_text`].
    Text {
        /// The text.
        text: String,
        /// Box the text is centered in.
        bounds: PxRect,
        /// Text color.
        color: Color,
    },
}

/// A surface that records what is drawn on it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Recorded commands, in drawing order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forgets recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl TextMeasurer for RecordingSurface {
    fn measure_text(&self, text: &str) -> PxSize {
        measure(text)
    }
}

impl Surface for RecordingSurface {
    fn draw_circle(&mut self, center: [f32; 2], radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rect(&mut self, rect: PxRect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_path(&mut self, path: &Path, color: Color) {
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, bounds: PxRect, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            bounds,
            color,
        });
    }
}

/// A notification received by a [`RecordingListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekBarEvent {
    /// [`SeekBarListener::on_value_changed`].
    ValueChanged {
        /// New value.
        value: i32,
        /// Whether the change came from input.
        from_user: bool,
    },
    /// [`SeekBarListener::on_drag_started`].
    DragStarted,
    /// [`SeekBarListener::on_drag_stopped`].
    DragStopped,
    /// [`SeekBarListener::on_indicator_shown`].
    IndicatorShown,
    /// [`SeekBarListener::on_indicator_hidden`].
    IndicatorHidden,
}

/// Listener that logs every notification. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<SeekBarEvent>>>,
}

impl RecordingListener {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn events(&self) -> Vec<SeekBarEvent> {
        self.events.lock().clone()
    }

    /// Takes everything received so far, leaving the log empty.
    pub fn take(&self) -> Vec<SeekBarEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Values reported so far, in order.
    pub fn values(&self) -> Vec<(i32, bool)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match *event {
                SeekBarEvent::ValueChanged { value, from_user } => Some((value, from_user)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: SeekBarEvent) {
        self.events.lock().push(event);
    }
}

impl SeekBarListener for RecordingListener {
    fn on_value_changed(&mut self, value: i32, from_user: bool) {
        self.push(SeekBarEvent::ValueChanged { value, from_user });
    }

    fn on_drag_started(&mut self) {
        self.push(SeekBarEvent::DragStarted);
    }

    fn on_drag_stopped(&mut self) {
        self.push(SeekBarEvent::DragStopped);
    }

    fn on_indicator_shown(&mut self) {
        self.push(SeekBarEvent::IndicatorShown);
    }

    fn on_indicator_hidden(&mut self) {
        self.push(SeekBarEvent::IndicatorHidden);
    }
}
