use std::time::Duration;

use discrete_seekbar::{
    AnimationChannel, Color, DiscreteSeekBar, FrameToken, IndicatorVisibility, Key, PointerEvent,
    Px, PxPosition, PxRect, PxSize, SavedState, SeekBarArgs,
    headless::{DrawCommand, HeadlessHost, RecordingListener, RecordingSurface, SeekBarEvent},
};

/// Width giving a 200px track: 10px touch padding and a 6px half thumb on
/// each side.
const WIDTH: i32 = 232;
const TRACK_START: i32 = 16;

struct Fixture {
    host: HeadlessHost,
    bar: DiscreteSeekBar,
    listener: RecordingListener,
}

impl Fixture {
    fn new(args: SeekBarArgs) -> Self {
        let mut host = HeadlessHost::new();
        let mut bar = DiscreteSeekBar::new(args, &mut host);
        bar.layout(&mut host, PxSize::new(Px(WIDTH), bar.measured_height()));
        let listener = RecordingListener::new();
        bar.set_listener(listener.clone());
        Self {
            host,
            bar,
            listener,
        }
    }

    fn at(&self, x: i32) -> PxPosition {
        PxPosition::new(Px(x), self.bar.thumb().bounds().center_y())
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.bar.on_pointer(&mut self.host, event);
    }

    fn down(&mut self, x: i32) {
        let at = self.at(x);
        self.pointer(PointerEvent::Down(at));
    }

    fn move_to(&mut self, x: i32) {
        let at = self.at(x);
        self.pointer(PointerEvent::Move(at));
    }

    fn up(&mut self, x: i32) {
        let at = self.at(x);
        self.pointer(PointerEvent::Up(at));
    }

    fn run(&mut self, millis: u64) {
        self.host.run(&mut self.bar, Duration::from_millis(millis));
    }

    fn settle(&mut self) {
        self.host.run_until_idle(&mut self.bar, Duration::from_secs(5));
    }

    fn thumb_center(&self) -> i32 {
        self.bar.thumb().bounds().center_x().0
    }
}

#[test]
fn drag_from_midpoint_reports_new_value_once() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    assert_eq!(f.thumb_center(), TRACK_START + 100);

    f.down(TRACK_START + 100);
    assert!(f.bar.is_dragging());
    assert_eq!(f.host.claim_count(), 1);

    f.move_to(TRACK_START + 150);
    assert_eq!(f.bar.value(), 75);
    assert_eq!(f.thumb_center(), TRACK_START + 150);
    f.up(TRACK_START + 150);

    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::DragStarted,
            SeekBarEvent::ValueChanged {
                value: 75,
                from_user: true
            },
            SeekBarEvent::DragStopped,
        ]
    );
    assert!(!f.bar.is_dragging());
}

#[test]
fn mirrored_drag_runs_right_to_left() {
    let args = SeekBarArgs::default().mirror_for_rtl(true).layout_rtl(true);
    let mut f = Fixture::new(args);
    assert_eq!(f.thumb_center(), TRACK_START + 200);

    f.down(TRACK_START + 200);
    f.move_to(TRACK_START + 50);
    f.up(TRACK_START + 50);
    assert_eq!(f.bar.value(), 75);
    assert_eq!(f.thumb_center(), TRACK_START + 50);
}

#[test]
fn arrow_keys_accumulate_on_animation_target() {
    let mut f = Fixture::new(SeekBarArgs::default().max(10));
    f.bar.set_focused(&mut f.host, true);

    for _ in 0..3 {
        assert!(f.bar.on_key(&mut f.host, Key::Right));
        f.run(20);
    }
    assert!(f.bar.is_animation_running());
    // No restart may take longer than a full transition.
    f.run(250);
    assert!(!f.bar.is_animation_running());
    assert_eq!(f.bar.value(), 3);
    assert_eq!(f.listener.values(), vec![(1, true), (2, true), (3, true)]);
    assert_eq!(f.thumb_center(), TRACK_START + 60);
}

#[test]
fn arrow_keys_stop_at_the_ends() {
    let mut f = Fixture::new(SeekBarArgs::default().max(10));
    assert!(f.bar.on_key(&mut f.host, Key::Left));
    assert!(!f.bar.is_animation_running());

    f.bar.set_value(&mut f.host, 10);
    assert!(f.bar.on_key(&mut f.host, Key::Right));
    assert!(!f.bar.is_animation_running());
    assert_eq!(f.host.pending_count(), 0);
}

#[test]
fn set_value_cancels_running_animation() {
    let mut f = Fixture::new(SeekBarArgs::default().max(10));
    f.bar.on_key(&mut f.host, Key::Right);
    f.run(50);
    f.bar.set_value(&mut f.host, 8);
    assert!(!f.bar.is_animation_running());
    f.settle();
    assert_eq!(f.bar.value(), 8);
    assert_eq!(f.thumb_center(), TRACK_START + 160);
}

#[test]
fn track_click_jumps_before_drag_starts() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 180);

    assert!(f.bar.is_dragging());
    assert_eq!(f.bar.value(), 90);
    assert_eq!(f.thumb_center(), TRACK_START + 180);
    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::ValueChanged {
                value: 90,
                from_user: true
            },
            SeekBarEvent::DragStarted,
        ]
    );

    // The grab point is now the thumb center; dragging continues from there.
    f.move_to(TRACK_START + 190);
    assert_eq!(f.bar.value(), 95);
}

#[test]
fn track_click_disabled_ignores_track() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50).track_click_enabled(false));
    f.down(TRACK_START + 180);
    f.up(TRACK_START + 180);
    assert!(!f.bar.is_dragging());
    assert_eq!(f.bar.value(), 50);
    assert!(f.listener.events().is_empty());
}

#[test]
fn scrolling_container_turns_track_click_into_tap() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.host.set_in_scrolling_container(true);

    f.down(TRACK_START + 180);
    assert!(!f.bar.is_dragging());
    assert_eq!(f.bar.value(), 50);

    f.up(TRACK_START + 180);
    assert_eq!(f.bar.value(), 90);
    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::ValueChanged {
                value: 90,
                from_user: true
            },
            SeekBarEvent::DragStarted,
            SeekBarEvent::DragStopped,
        ]
    );
}

#[test]
fn indicator_opens_after_delay_and_closes_on_release() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.host.set_location_on_screen(PxPosition::new(Px(40), Px(600)));

    f.down(TRACK_START + 100);
    f.run(140);
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    f.run(20);
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Opening);
    assert_eq!(f.host.overlays().len(), 1);

    f.settle();
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Shown);
    assert!(f.bar.indicator().is_label_visible());
    assert!(f.bar.thumb().is_open());

    let mut surface = RecordingSurface::default();
    f.bar.draw_indicator(&mut surface);
    assert!(surface.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Text { text, .. } if text == "50"
    )));

    f.up(TRACK_START + 100);
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Closing);
    assert!(!f.bar.indicator().is_label_visible());

    f.settle();
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    assert!(f.host.overlays().is_empty());
    assert!(!f.bar.thumb().is_open());
    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::DragStarted,
            SeekBarEvent::IndicatorShown,
            SeekBarEvent::DragStopped,
            SeekBarEvent::IndicatorHidden,
        ]
    );
}

#[test]
fn quick_tap_never_shows_indicator() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 100);
    f.run(100);
    f.up(TRACK_START + 100);
    f.settle();
    assert!(f.host.overlays().is_empty());
    assert_eq!(
        f.listener.events(),
        vec![SeekBarEvent::DragStarted, SeekBarEvent::DragStopped]
    );
}

#[test]
fn dismiss_during_open_reaches_hidden() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 100);
    f.run(170);
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Opening);

    f.up(TRACK_START + 100);
    for _ in 0..60 {
        f.run(16);
        if f.bar.indicator().visibility() == IndicatorVisibility::Hidden {
            assert!(!f.bar.indicator().is_label_visible());
        }
    }
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    assert!(f.host.overlays().is_empty());
    assert_eq!(f.host.pending_count(), 0);
}

#[test]
fn indicator_disabled_stays_hidden() {
    let mut f = Fixture::new(SeekBarArgs::default().indicator_enabled(false));
    f.bar.set_focused(&mut f.host, true);
    f.settle();
    assert!(f.host.overlays().is_empty());
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
}

#[test]
fn indicator_follows_thumb_while_dragging() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 100);
    f.settle();
    let before = f.bar.indicator().marker().left();

    f.move_to(TRACK_START + 140);
    let after = f.bar.indicator().marker().left();
    assert_eq!(after - before, Px(40));
    assert_eq!(f.bar.label(), "70");
}

#[test]
fn layout_change_force_dismisses_and_reshows() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.bar.set_focused(&mut f.host, true);
    f.settle();
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Shown);

    let height = f.bar.measured_height();
    f.bar.layout(&mut f.host, PxSize::new(Px(432), height));
    assert!(f.host.overlays().is_empty());
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    assert_eq!(f.thumb_center(), TRACK_START + 200);

    f.settle();
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Shown);
    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::IndicatorShown,
            SeekBarEvent::IndicatorHidden,
            SeekBarEvent::IndicatorShown,
        ]
    );
}

#[test]
fn detach_cancels_everything() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 100);
    f.run(200);
    f.bar.on_key(&mut f.host, Key::Right);
    assert!(f.host.pending_count() > 0);

    f.bar.detach(&mut f.host);
    assert_eq!(f.host.pending_count(), 0);
    assert!(f.host.overlays().is_empty());
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    f.bar.detach(&mut f.host);
}

#[test]
fn range_change_while_shown_restores_thumb_and_reshows() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 100);
    f.run(800);
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Shown);
    assert!(f.bar.thumb().is_open());

    f.bar.set_max(&mut f.host, 200);
    assert!(f.bar.is_dragging());
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    assert!(f.host.overlays().is_empty());
    assert!(!f.bar.thumb().is_open());
    assert_eq!(f.thumb_center(), TRACK_START + 50);

    let mut surface = RecordingSurface::default();
    f.bar.draw(&mut surface);
    assert!(
        surface
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Circle { .. }))
    );

    f.settle();
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Shown);
    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::DragStarted,
            SeekBarEvent::IndicatorShown,
            SeekBarEvent::IndicatorHidden,
            SeekBarEvent::IndicatorShown,
        ]
    );
}

#[test]
fn formatter_change_while_focused_resizes_and_reshows() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.bar.set_focused(&mut f.host, true);
    f.settle();
    let narrow = f.bar.indicator().measured_size().width;

    f.bar.set_formatter(&mut f.host, "%d percent");
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Hidden);
    assert!(!f.bar.thumb().is_open());
    assert!(f.bar.indicator().measured_size().width > narrow);

    f.settle();
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Shown);
    assert_eq!(f.bar.label(), "50 percent");
    assert_eq!(
        f.listener.events(),
        vec![
            SeekBarEvent::IndicatorShown,
            SeekBarEvent::IndicatorHidden,
            SeekBarEvent::IndicatorShown,
        ]
    );
}

#[test]
fn set_value_to_current_snaps_animated_thumb_back() {
    let mut f = Fixture::new(SeekBarArgs::default().max(10));
    f.bar.on_key(&mut f.host, Key::Right);
    f.run(50);
    assert_eq!(f.bar.value(), 0);
    assert_ne!(f.thumb_center(), TRACK_START);

    f.bar.set_value(&mut f.host, 0);
    assert!(!f.bar.is_animation_running());
    assert_eq!(f.thumb_center(), TRACK_START);
    assert!(f.listener.events().is_empty());
}

#[test]
fn raising_min_above_max_pushes_max() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.bar.set_min(&mut f.host, 150);
    assert_eq!((f.bar.min(), f.bar.max()), (150, 151));
    assert_eq!(f.bar.value(), 150);
    assert_eq!(f.listener.values(), vec![(150, false)]);

    f.bar.set_max(&mut f.host, 100);
    assert_eq!((f.bar.min(), f.bar.max()), (99, 100));
    assert_eq!(f.bar.value(), 99);
}

#[test]
fn saved_state_round_trips_through_bytes() {
    let mut f = Fixture::new(SeekBarArgs::default().min(-20).max(40).value(7));
    let record = f.bar.save_state().to_bytes();
    assert_eq!(
        SavedState::from_bytes(&record),
        Ok(SavedState {
            value: 7,
            max: 40,
            min: -20
        })
    );

    let mut other = Fixture::new(SeekBarArgs::default());
    let state = SavedState::from_bytes(&record).expect("valid record");
    other.bar.restore_state(&mut other.host, state);
    assert_eq!((other.bar.min(), other.bar.max(), other.bar.value()), (-20, 40, 7));

    // A range entirely above the current one restores too.
    let high = SavedState {
        value: 250,
        max: 300,
        min: 200,
    };
    f.bar.restore_state(&mut f.host, high);
    assert_eq!(f.bar.save_state(), high);
}

#[test]
fn stale_tokens_are_ignored() {
    let mut f = Fixture::new(SeekBarArgs::default().max(10));
    f.bar.on_key(&mut f.host, Key::Right);
    let stale = FrameToken {
        channel: AnimationChannel::Position,
        generation: 0,
    };
    assert!(!f.bar.on_frame(&mut f.host, stale));
    let stale_show = FrameToken {
        channel: AnimationChannel::ShowIndicator,
        generation: 7,
    };
    assert!(!f.bar.on_frame(&mut f.host, stale_show));
    assert_eq!(f.bar.value(), 0);
}

#[test]
fn stale_marker_tokens_are_ignored() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50));
    f.down(TRACK_START + 100);
    f.run(200);
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Opening);

    let stale = FrameToken {
        channel: AnimationChannel::Marker,
        generation: u64::MAX,
    };
    assert!(!f.bar.on_frame(&mut f.host, stale));
    assert_eq!(f.bar.indicator().visibility(), IndicatorVisibility::Opening);
}

#[test]
fn draw_paints_track_scrubber_and_thumb() {
    let f = Fixture::new(SeekBarArgs::default().value(50));
    let mut surface = RecordingSurface::default();
    f.bar.draw(&mut surface);

    let commands = surface.commands();
    assert_eq!(commands.len(), 3);
    match &commands[0] {
        DrawCommand::Rect { rect, color } => {
            assert_eq!(*rect, PxRect::new(Px(16), Px(15), Px(216), Px(17)));
            assert_eq!(*color, Color::GRAY);
        }
        other => panic!("expected track, got {other:?}"),
    }
    match &commands[1] {
        DrawCommand::Rect { rect, color } => {
            assert_eq!(*rect, PxRect::new(Px(16), Px(14), Px(116), Px(18)));
            assert_eq!(*color, Color::TEAL);
        }
        other => panic!("expected scrubber, got {other:?}"),
    }
    match &commands[2] {
        DrawCommand::Circle { center, radius, .. } => {
            assert_eq!(*center, [116.0, 16.0]);
            assert_eq!(*radius, 6.0);
        }
        other => panic!("expected thumb, got {other:?}"),
    }
}

#[test]
fn native_ripple_gets_inset_hotspot_bounds() {
    let mut f = Fixture::new(SeekBarArgs::default().value(50).native_ripple(true));
    let native = f.bar.ripple().as_native().expect("native ripple");
    assert_eq!(
        native.hotspot_bounds(),
        PxRect::new(Px(104), Px(4), Px(128), Px(28))
    );

    f.down(TRACK_START + 103);
    let native = f.bar.ripple().as_native().expect("native ripple");
    assert!(native.state().pressed);
    assert_eq!(native.hotspot().x, Px(TRACK_START + 103));
}
