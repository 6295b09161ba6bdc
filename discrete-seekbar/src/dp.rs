//! Density-independent lengths.
//!
//! The seek bar's default dimensions (thumb size, touch target, indicator
//! separation) are given in dp. Unlike a windowing toolkit there is no global
//! scale factor here: a [`Density`] travels with the control's configuration
//! and every conversion names it.

use crate::px::Px;

/// Physical pixels per dp.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Density(pub f32);

impl Density {
    /// One pixel per dp.
    pub const BASELINE: Self = Self(1.0);
}

impl Default for Density {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Density-independent pixels (dp) for UI scaling.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    /// Creates a new `Dp` instance.
    pub const fn new(value: f32) -> Self {
        Dp(value)
    }

    /// Returns the value in pixels as f32.
    pub fn to_pixels_f32(self, density: Density) -> f32 {
        self.0 * density.0
    }

    /// Returns the value in whole pixels, truncated like a dimension
    /// pixel size lookup.
    pub fn to_px(self, density: Density) -> Px {
        Px(self.to_pixels_f32(density) as i32)
    }

    /// Get dp from pixels.
    pub fn from_px(px: Px, density: Density) -> Self {
        Dp(px.to_f32() / density.0)
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Dp::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_to_px_scales_and_truncates() {
        assert_eq!(Dp(12.0).to_px(Density::BASELINE), Px(12));
        assert_eq!(Dp(12.0).to_px(Density(2.0)), Px(24));
        assert_eq!(Dp(5.0).to_px(Density(1.5)), Px(7));
    }

    #[test]
    fn test_dp_from_px() {
        assert_eq!(Dp::from_px(Px(48), Density(3.0)), Dp(16.0));
    }
}
