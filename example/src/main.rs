//! Drives a seek bar through a scripted session on the headless host.
//!
//! Run with `RUST_LOG=discrete_seekbar=trace` to see every animation tick.

use std::time::Duration;

use discrete_seekbar::{
    DiscreteSeekBar, Key, PointerEvent, Px, PxPosition, PxSize, SavedState, SeekBarArgs,
    headless::{DrawCommand, HeadlessHost, RecordingListener, RecordingSurface},
};

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,discrete_seekbar=debug") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

fn describe_indicator(bar: &DiscreteSeekBar) {
    let mut surface = RecordingSurface::default();
    bar.draw_indicator(&mut surface);
    for command in surface.commands() {
        match command {
            DrawCommand::Path { color, .. } => {
                tracing::info!(alpha = color.a, "indicator bubble painted");
            }
            DrawCommand::Text { text, bounds, .. } => {
                tracing::info!(%text, left = bounds.left.0, "indicator label painted");
            }
            _ => {}
        }
    }
}

fn main() {
    init_tracing();

    let mut host = HeadlessHost::new();
    host.set_location_on_screen(PxPosition::new(Px(40), Px(600)));

    let args = SeekBarArgs::default().value(50).formatter("%d%%");
    let mut bar = DiscreteSeekBar::new(args, &mut host);
    let listener = RecordingListener::new();
    bar.set_listener(listener.clone());
    bar.layout(&mut host, PxSize::new(Px(432), bar.measured_height()));

    // Grab the thumb and drag it most of the way right.
    let y = bar.thumb().bounds().center_y();
    let mut x = bar.thumb().bounds().center_x();
    bar.on_pointer(&mut host, PointerEvent::Down(PxPosition::new(x, y)));
    for _ in 0..10 {
        x += Px(15);
        bar.on_pointer(&mut host, PointerEvent::Move(PxPosition::new(x, y)));
        host.run(&mut bar, Duration::from_millis(40));
    }
    tracing::info!(value = bar.value(), visibility = ?bar.indicator().visibility(), "dragging");
    describe_indicator(&bar);

    bar.on_pointer(&mut host, PointerEvent::Up(PxPosition::new(x, y)));
    host.run_until_idle(&mut bar, Duration::from_secs(2));
    tracing::info!(value = bar.value(), visibility = ?bar.indicator().visibility(), "released");

    // Keyboard: focus, then step left three times in quick succession.
    bar.set_focused(&mut host, true);
    for _ in 0..3 {
        bar.on_key(&mut host, Key::Left);
        host.run(&mut bar, Duration::from_millis(50));
    }
    host.run_until_idle(&mut bar, Duration::from_secs(2));
    tracing::info!(value = bar.value(), label = bar.label(), "after arrow keys");
    bar.set_focused(&mut host, false);
    host.run_until_idle(&mut bar, Duration::from_secs(2));

    // Persist and restore into a fresh control.
    let record = bar.save_state().to_bytes();
    bar.detach(&mut host);
    let mut restored = DiscreteSeekBar::new(SeekBarArgs::default(), &mut host);
    match SavedState::from_bytes(&record) {
        Ok(state) => restored.restore_state(&mut host, state),
        Err(err) => tracing::error!(%err, "could not restore seek bar"),
    }
    tracing::info!(value = restored.value(), "restored");

    for event in listener.events() {
        tracing::info!(?event, "notification");
    }
}
