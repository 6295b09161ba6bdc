//! Discrete value domain and its mapping onto the track.

use crate::px::Px;

/// Inclusive integer range with `max > min` at all times.
///
/// Setting one bound past the other drags the other bound along instead of
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    min: i32,
    max: i32,
}

impl Range {
    /// Creates a range, pushing `max` up to `min + 1` when needed.
    pub fn new(min: i32, max: i32) -> Self {
        let mut range = Self { min, max };
        range.set_min(min);
        range
    }

    /// Lower bound.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// `max - min`, always at least 1.
    pub fn span(&self) -> i64 {
        self.max as i64 - self.min as i64
    }

    /// Sets the lower bound. Returns `true` if `max` had to move.
    pub fn set_min(&mut self, min: i32) -> bool {
        let min = min.min(i32::MAX - 1);
        self.min = min;
        if self.max <= min {
            self.max = min + 1;
            tracing::debug!(min, max = self.max, "range corrected: max pushed above min");
            return true;
        }
        false
    }

    /// Sets the upper bound. Returns `true` if `min` had to move.
    pub fn set_max(&mut self, max: i32) -> bool {
        let max = max.max(i32::MIN + 1);
        self.max = max;
        if self.min >= max {
            self.min = max - 1;
            tracing::debug!(min = self.min, max, "range corrected: min pushed below max");
            return true;
        }
        false
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Normalized position of `value`: `0.0` at `min`, `1.0` at `max`.
    ///
    /// Accepts fractional values so animated positions map too.
    pub fn scale_of(&self, value: f32) -> f32 {
        ((value as f64 - self.min as f64) / self.span() as f64) as f32
    }

    /// Nearest integer value for a normalized position, rounding half away
    /// from zero.
    pub fn value_at(&self, scale: f32) -> i32 {
        let value = (scale as f64 * self.span() as f64 + self.min as f64).round();
        self.clamp(value.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

/// Pure mapping between discrete values and pixel offsets along the track.
///
/// Offsets are measured from the left end of the track. With `rtl` set the
/// mapping is mirrored: `min` sits at the right end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueGeometry {
    range: Range,
}

impl ValueGeometry {
    /// Creates a mapping for `range`.
    pub fn new(range: Range) -> Self {
        Self { range }
    }

    /// The mapped range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Pixel offset of `value`, rounded to the nearest pixel.
    pub fn value_to_offset(&self, value: i32, track_length: Px, rtl: bool) -> Px {
        self.position_to_offset(value as f32, track_length, rtl)
    }

    /// Pixel offset of a fractional position such as an animated value.
    pub fn position_to_offset(&self, position: f32, track_length: Px, rtl: bool) -> Px {
        let length = track_length.0.max(0) as f32;
        let mut scale = self.range.scale_of(position).clamp(0.0, 1.0);
        if rtl {
            scale = 1.0 - scale;
        }
        Px((scale * length).round() as i32)
    }

    /// Nearest value at `offset`. Offsets outside the track are clamped to
    /// its ends first.
    pub fn offset_to_value(&self, offset: Px, track_length: Px, rtl: bool) -> i32 {
        if track_length.0 <= 0 {
            return if rtl { self.range.max() } else { self.range.min() };
        }
        let offset = offset.0.clamp(0, track_length.0);
        let mut scale = offset as f32 / track_length.0 as f32;
        if rtl {
            scale = 1.0 - scale;
        }
        self.range.value_at(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_are_corrected() {
        let mut range = Range::new(0, 10);
        assert!(range.set_min(15));
        assert_eq!((range.min(), range.max()), (15, 16));

        assert!(range.set_max(3));
        assert_eq!((range.min(), range.max()), (2, 3));

        assert!(range.set_max(2));
        assert_eq!((range.min(), range.max()), (1, 2));

        assert!(!range.set_min(-5));
        assert_eq!(Range::new(4, 4), Range::new(4, 5));
    }

    #[test]
    fn test_range_extremes_do_not_overflow() {
        let range = Range::new(i32::MAX, i32::MAX);
        assert!(range.max() > range.min());
        let mut range = Range::default();
        range.set_max(i32::MIN);
        assert!(range.max() > range.min());
    }

    #[test]
    fn test_value_at_rounds_half_away_from_zero() {
        let range = Range::new(-2, 2);
        assert_eq!(range.value_at(0.625), 1);
        assert_eq!(range.value_at(0.375), -1);
        assert_eq!(range.value_at(-1.0), -2);
        assert_eq!(range.value_at(2.0), 2);
    }

    #[test]
    fn test_value_to_offset_midpoint() {
        let geometry = ValueGeometry::new(Range::new(0, 100));
        assert_eq!(geometry.value_to_offset(50, Px(200), false), Px(100));
        assert_eq!(geometry.value_to_offset(0, Px(200), true), Px(200));
        assert_eq!(geometry.offset_to_value(Px(150), Px(200), false), 75);
        assert_eq!(geometry.offset_to_value(Px(150), Px(200), true), 25);
    }

    #[test]
    fn test_offsets_outside_track_are_clamped() {
        let geometry = ValueGeometry::new(Range::new(0, 10));
        assert_eq!(geometry.offset_to_value(Px(-40), Px(100), false), 0);
        assert_eq!(geometry.offset_to_value(Px(400), Px(100), false), 10);
        assert_eq!(geometry.offset_to_value(Px(400), Px(100), true), 0);
        assert_eq!(geometry.offset_to_value(Px(10), Px(0), false), 0);
    }

    #[test]
    fn test_round_trip_is_exact_on_integer_grid() {
        for (min, max, length) in [(0, 100, 200), (-7, 13, 20), (0, 10, 337), (-50, 50, 101)] {
            let geometry = ValueGeometry::new(Range::new(min, max));
            for rtl in [false, true] {
                for value in min..=max {
                    let offset = geometry.value_to_offset(value, Px(length), rtl);
                    assert!((0..=length).contains(&offset.0));
                    assert_eq!(
                        geometry.offset_to_value(offset, Px(length), rtl),
                        value,
                        "range {min}..={max}, length {length}, rtl {rtl}"
                    );
                }
            }
        }
    }
}
