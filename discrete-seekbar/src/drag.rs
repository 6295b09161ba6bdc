//! Pointer drag state machine.
//!
//! [`DragController`] turns raw pointer events into thumb moves. It knows
//! nothing about values: the owner implements [`DragTarget`] to map a thumb
//! position to a value and to react to drag start and stop.

use crate::px::{Px, PxPosition, PxRect};

/// Pointer input delivered to the control, in control-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down(PxPosition),
    /// Pointer moved with the button held.
    Move(PxPosition),
    /// Primary button released.
    Up(PxPosition),
    /// The gesture was taken away by the host.
    Cancel,
}

/// Phase of the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// A pointer owns the thumb.
    Dragging,
}

/// Tunables of the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragConfig {
    /// Extra hit area around the thumb.
    pub touch_padding: Px,
    /// Horizontal travel after which a press turns into a drag.
    pub touch_slop: Px,
    /// Whether pressing the track away from the thumb jumps the thumb there.
    pub track_click_enabled: bool,
}

/// The side of the control a drag acts upon.
pub trait DragTarget {
    /// Current thumb rectangle, without touch padding.
    fn thumb_bounds(&self) -> PxRect;

    /// Whether the control sits in a container that delays presses to tell
    /// taps from scrolls.
    fn in_scrolling_container(&self) -> bool;

    /// Moves the thumb so its center is as close as possible to `center_x`.
    fn drag_thumb_to(&mut self, center_x: Px);

    /// Records the pointer position for hotspot-tracking effects.
    fn set_hotspot(&mut self, at: PxPosition);

    /// Called when the controller enters [`DragPhase::Dragging`].
    fn drag_started(&mut self);

    /// Called when the controller leaves [`DragPhase::Dragging`].
    fn drag_stopped(&mut self);
}

/// Drag session state: the phase, the grab offset and the press position.
///
/// The grab offset is the distance between the pointer and the thumb's left
/// edge, so the thumb keeps its position relative to the finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragController {
    phase: DragPhase,
    drag_offset: Px,
    down_x: Px,
}

impl DragController {
    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Offset between the pointer and the thumb's left edge.
    pub fn drag_offset(&self) -> Px {
        self.drag_offset
    }

    /// Feeds one pointer event.
    pub fn on_pointer<T: DragTarget + ?Sized>(
        &mut self,
        event: PointerEvent,
        config: &DragConfig,
        target: &mut T,
    ) {
        match event {
            PointerEvent::Down(at) => {
                self.down_x = at.x;
                let in_scroll = target.in_scrolling_container();
                self.start(at, in_scroll, config, target);
            }
            PointerEvent::Move(at) => {
                if self.is_dragging() {
                    self.update(at, target);
                } else if (at.x - self.down_x).0.abs() > config.touch_slop.0 {
                    self.start(at, false, config, target);
                }
            }
            PointerEvent::Up(at) => {
                if !self.is_dragging() && config.track_click_enabled {
                    // A press held back by a scrolling ancestor still counts
                    // as a click on release.
                    if self.start(at, false, config, target) {
                        self.update(at, target);
                    }
                }
                self.stop(target);
            }
            PointerEvent::Cancel => self.stop(target),
        }
    }

    /// Forces the session back to idle, notifying the target if a drag was
    /// active.
    pub fn reset<T: DragTarget + ?Sized>(&mut self, target: &mut T) {
        self.stop(target);
    }

    fn start<T: DragTarget + ?Sized>(
        &mut self,
        at: PxPosition,
        ignore_track: bool,
        config: &DragConfig,
        target: &mut T,
    ) -> bool {
        let pad = config.touch_padding;
        let mut bounds = target.thumb_bounds().inset(-pad, -pad);
        let mut dragging = bounds.contains(at);
        if !dragging && config.track_click_enabled && !ignore_track {
            dragging = true;
            self.drag_offset = target.thumb_bounds().width().half();
            self.update(at, target);
            bounds = target.thumb_bounds().inset(-pad, -pad);
            tracing::debug!(x = at.x.0, "track click, thumb jumped");
        }
        if dragging {
            self.phase = DragPhase::Dragging;
            self.drag_offset = at.x - bounds.left - pad;
            target.set_hotspot(at);
            target.drag_started();
            tracing::debug!(x = at.x.0, offset = self.drag_offset.0, "drag started");
        }
        dragging
    }

    fn update<T: DragTarget + ?Sized>(&mut self, at: PxPosition, target: &mut T) {
        target.set_hotspot(at);
        let half_thumb = target.thumb_bounds().width().half();
        target.drag_thumb_to(at.x - self.drag_offset + half_thumb);
    }

    fn stop<T: DragTarget + ?Sized>(&mut self, target: &mut T) {
        if self.is_dragging() {
            self.phase = DragPhase::Idle;
            target.drag_stopped();
            tracing::debug!("drag stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Thumb of width 10 on a track from x=0 to x=100, positions snapped to
    /// multiples of 10.
    #[derive(Default)]
    struct FakeTarget {
        center: i32,
        in_scroll: bool,
        started: u32,
        stopped: u32,
        moves: Vec<i32>,
    }

    impl DragTarget for FakeTarget {
        fn thumb_bounds(&self) -> PxRect {
            PxRect::new(Px(self.center - 5), Px(0), Px(self.center + 5), Px(10))
        }

        fn in_scrolling_container(&self) -> bool {
            self.in_scroll
        }

        fn drag_thumb_to(&mut self, center_x: Px) {
            let snapped = ((center_x.0.clamp(0, 100) as f32 / 10.0).round() as i32) * 10;
            self.center = snapped;
            self.moves.push(snapped);
        }

        fn set_hotspot(&mut self, _at: PxPosition) {}

        fn drag_started(&mut self) {
            self.started += 1;
        }

        fn drag_stopped(&mut self) {
            self.stopped += 1;
        }
    }

    fn config(track_click_enabled: bool) -> DragConfig {
        DragConfig {
            touch_padding: Px(2),
            touch_slop: Px(8),
            track_click_enabled,
        }
    }

    fn at(x: i32) -> PxPosition {
        PxPosition::new(Px(x), Px(5))
    }

    #[test]
    fn test_grab_inside_thumb_keeps_relative_offset() {
        let mut target = FakeTarget {
            center: 50,
            ..Default::default()
        };
        let mut drag = DragController::default();
        drag.on_pointer(PointerEvent::Down(at(53)), &config(true), &mut target);
        assert!(drag.is_dragging());
        assert_eq!(drag.drag_offset(), Px(8));
        assert_eq!(target.started, 1);
        assert!(target.moves.is_empty());

        drag.on_pointer(PointerEvent::Move(at(73)), &config(true), &mut target);
        assert_eq!(target.center, 70);

        drag.on_pointer(PointerEvent::Up(at(73)), &config(true), &mut target);
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_eq!(target.stopped, 1);
    }

    #[test]
    fn test_track_click_jumps_then_drags() {
        let mut target = FakeTarget::default();
        let mut drag = DragController::default();
        drag.on_pointer(PointerEvent::Down(at(62)), &config(true), &mut target);
        assert!(drag.is_dragging());
        assert_eq!(target.moves, vec![60]);
        assert_eq!(target.started, 1);
        // The offset is taken from the snapped thumb, not the click.
        assert_eq!(drag.drag_offset(), Px(62 - 55));
    }

    #[test]
    fn test_track_click_disabled_needs_thumb_hit() {
        let mut target = FakeTarget::default();
        let mut drag = DragController::default();
        drag.on_pointer(PointerEvent::Down(at(62)), &config(false), &mut target);
        assert!(!drag.is_dragging());
        drag.on_pointer(PointerEvent::Move(at(90)), &config(false), &mut target);
        assert!(!drag.is_dragging());
        drag.on_pointer(PointerEvent::Up(at(90)), &config(false), &mut target);
        assert_eq!((target.started, target.stopped), (0, 0));
        assert!(target.moves.is_empty());
    }

    #[test]
    fn test_scrolling_container_defers_track_click_to_release() {
        let mut target = FakeTarget {
            in_scroll: true,
            ..Default::default()
        };
        let mut drag = DragController::default();
        drag.on_pointer(PointerEvent::Down(at(40)), &config(true), &mut target);
        assert!(!drag.is_dragging());
        assert!(target.moves.is_empty());

        drag.on_pointer(PointerEvent::Up(at(40)), &config(true), &mut target);
        assert_eq!(target.center, 40);
        assert_eq!((target.started, target.stopped), (1, 1));
    }

    #[test]
    fn test_slop_turns_press_into_drag() {
        let mut target = FakeTarget {
            in_scroll: true,
            ..Default::default()
        };
        let mut drag = DragController::default();
        drag.on_pointer(PointerEvent::Down(at(40)), &config(true), &mut target);
        drag.on_pointer(PointerEvent::Move(at(45)), &config(true), &mut target);
        assert!(!drag.is_dragging());
        drag.on_pointer(PointerEvent::Move(at(49)), &config(true), &mut target);
        assert!(drag.is_dragging());
        assert_eq!(target.center, 50);
    }

    #[test]
    fn test_cancel_stops_once() {
        let mut target = FakeTarget::default();
        let mut drag = DragController::default();
        drag.on_pointer(PointerEvent::Down(at(1)), &config(true), &mut target);
        drag.on_pointer(PointerEvent::Cancel, &config(true), &mut target);
        drag.on_pointer(PointerEvent::Cancel, &config(true), &mut target);
        assert_eq!(target.stopped, 1);
    }
}
