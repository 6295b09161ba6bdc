//! Colors and per-state color lists.

use crate::state::InteractionState;

/// A color in the linear sRGB color space with an alpha component.
///
/// Values are stored as `f32`s, typically in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque gray (`#888888`).
    pub const GRAY: Color = Color::new(0x88 as f32 / 255.0, 0x88 as f32 / 255.0, 0x88 as f32 / 255.0, 1.0);
    /// Opaque dark gray (`#444444`).
    pub const DARK_GRAY: Color =
        Color::new(0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 1.0);
    /// Default thumb/scrubber teal (`#009688`).
    pub const TEAL: Color = Color::new(0.0, 0x96 as f32 / 255.0, 0x88 as f32 / 255.0, 1.0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color` from three `f32` values (red, green, blue).
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new `Color` from four `u8` values (red, green, blue, alpha).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Creates a new opaque `Color` from three `u8` values (red, green, blue).
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    pub fn from_argb_u32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba_u8(r, g, b, a)
    }

    /// Returns the alpha channel as an 8-bit value.
    pub fn alpha_u8(self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Returns `true` if the color contributes nothing when painted.
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Scales the alpha channel by an 8-bit `alpha` using the
    /// `alpha * (scale + scale >> 7) >> 8` fixed point rule of drawable
    /// alpha modulation.
    pub fn modulate_alpha(self, alpha: u8) -> Self {
        let scale = alpha as u32 + (alpha as u32 >> 7);
        let modulated = (self.alpha_u8() as u32 * scale) >> 8;
        self.with_alpha(modulated as f32 / 255.0)
    }

    /// Mixes `start` and `end`: `factor == 1.0` yields `start`,
    /// `factor == 0.0` yields `end`.
    pub fn blend(start: Color, end: Color, factor: f32) -> Color {
        let factor = factor.clamp(0.0, 1.0);
        let inverse = 1.0 - factor;
        Color::new(
            start.r * factor + end.r * inverse,
            start.g * factor + end.g * inverse,
            start.b * factor + end.b * inverse,
            start.a * factor + end.a * inverse,
        )
    }

    /// Converts the color to an array of `[f32; 4]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb_u8(r, g, b)
    }
}

/// A color that varies with the control's interaction state.
///
/// Lookup order is disabled, pressed, focused, then the default color. Any
/// state without an explicit entry falls back to `default`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateColors {
    /// Color used when no other state matches.
    pub default: Color,
    /// Color while pressed.
    pub pressed: Option<Color>,
    /// Color while focused.
    pub focused: Option<Color>,
    /// Color while disabled.
    pub disabled: Option<Color>,
}

impl StateColors {
    /// A list with a single color for every state.
    pub const fn single(color: Color) -> Self {
        Self {
            default: color,
            pressed: None,
            focused: None,
            disabled: None,
        }
    }

    /// Sets the pressed color.
    pub fn with_pressed(mut self, color: Color) -> Self {
        self.pressed = Some(color);
        self
    }

    /// Sets the focused color.
    pub fn with_focused(mut self, color: Color) -> Self {
        self.focused = Some(color);
        self
    }

    /// Sets the disabled color.
    pub fn with_disabled(mut self, color: Color) -> Self {
        self.disabled = Some(color);
        self
    }

    /// Resolves the color for `state`.
    pub fn resolve(&self, state: InteractionState) -> Color {
        if !state.enabled {
            return self.disabled.unwrap_or(self.default);
        }
        if state.pressed
            && let Some(pressed) = self.pressed
        {
            return pressed;
        }
        if state.focused
            && let Some(focused) = self.focused
        {
            return focused;
        }
        self.default
    }

    /// The enabled+pressed color, falling back to the default.
    pub fn pressed_color(&self) -> Color {
        self.pressed.unwrap_or(self.default)
    }

    /// The enabled+focused color, falling back to the default.
    pub fn focused_color(&self) -> Color {
        self.focused.unwrap_or(self.default)
    }
}

impl From<Color> for StateColors {
    fn from(color: Color) -> Self {
        Self::single(color)
    }
}
