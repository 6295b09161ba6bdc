//! A discrete seek bar: an integer slider with a floating value indicator.
//!
//! The control is headless. It owns the value, the drag state machine and
//! the animations, and talks to its environment only through the
//! capability traits in [`host`] and [`scheduler`]: frame callbacks are
//! tokens the host hands back, drawing goes to a [`Surface`], and the
//! indicator bubble lives in an overlay the host places on screen.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use discrete_seekbar::{
//!     DiscreteSeekBar, IndicatorVisibility, Key, Px, PxSize, SeekBarArgs,
//!     headless::{HeadlessHost, RecordingListener},
//! };
//!
//! let mut host = HeadlessHost::new();
//! let mut bar = DiscreteSeekBar::new(SeekBarArgs::default().max(10), &mut host);
//! let listener = RecordingListener::new();
//! bar.set_listener(listener.clone());
//! bar.layout(&mut host, PxSize::new(Px(300), bar.measured_height()));
//!
//! bar.set_focused(&mut host, true);
//! bar.on_key(&mut host, Key::Right);
//! host.run(&mut bar, Duration::from_millis(500));
//!
//! assert_eq!(bar.value(), 1);
//! assert_eq!(bar.indicator().visibility(), IndicatorVisibility::Shown);
//! assert_eq!(listener.values(), vec![(1, true)]);
//! ```
//!
//! Real hosts implement [`SeekBarHost`] on top of their window system and
//! forward pointer, key, focus, size and frame events to the control.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod color;
pub mod dp;
pub mod drag;
pub mod error;
pub mod format;
pub mod geometry;
pub mod headless;
pub mod host;
pub mod indicator;
pub mod layout;
pub mod marker;
pub mod prop;
pub mod px;
pub mod ripple;
pub mod scheduler;
pub mod seekbar;
pub mod state;
pub mod thumb;

pub use crate::{
    color::{Color, StateColors},
    dp::{Density, Dp},
    drag::PointerEvent,
    error::SeekBarError,
    format::{NumericTransformer, ValueFormatter},
    geometry::{Range, ValueGeometry},
    host::{
        GestureArbiter, Invalidator, OverlayHandle, OverlayHost, OverlayPlacement, SeekBarHost,
        Surface, TextMeasurer,
    },
    indicator::IndicatorVisibility,
    layout::Padding,
    prop::CallbackWith,
    px::{Px, PxPosition, PxRect, PxSize},
    scheduler::{AnimationChannel, FrameScheduler, FrameToken},
    seekbar::{DiscreteSeekBar, Key, SavedState, SeekBarArgs, SeekBarListener},
    state::InteractionState,
};
