//! Conversion between arbitrary (real-world) values and the raw values a network works with.

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Error;

/// Maps `v` from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// Returns [`Error::InvalidRange`] if `from_min == from_max`, for which the map is undefined.
pub fn range_map<T: Float>(
    v: T,
    from_min: T,
    from_max: T,
    to_min: T,
    to_max: T,
) -> Result<T, Error> {
    let span = from_max - from_min;

    if span == T::zero() || !span.is_finite() {
        return Err(Error::InvalidRange);
    }

    Ok((to_max - to_min) / span * (v - from_max) + to_max)
}

/// The value range of a single network input or output.
///
/// Arbitrary values in `[from_min, from_max]` are mapped onto raw values in `[to_min, to_max]`,
/// and back again for outputs. Saved as a `[from_min, from_max, to_min, to_max]` array.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 4]", into = "[f64; 4]"))]
pub struct ValueRange {
    pub from_min: f64,
    pub from_max: f64,
    pub to_min: f64,
    pub to_max: f64,
}

impl ValueRange {
    pub fn new(from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> Self {
        Self {
            from_min,
            from_max,
            to_min,
            to_max,
        }
    }

    /// Checks that both sides of the range can be divided by.
    pub fn validate(&self) -> Result<(), Error> {
        self.value_to_raw(self.from_min)?;
        self.raw_to_value(self.to_min)?;
        Ok(())
    }

    /// Converts an arbitrary value to a raw value.
    pub fn value_to_raw(&self, value: f64) -> Result<f64, Error> {
        range_map(value, self.from_min, self.from_max, self.to_min, self.to_max)
    }

    /// Converts a raw value back to an arbitrary value.
    pub fn raw_to_value(&self, raw: f64) -> Result<f64, Error> {
        range_map(raw, self.to_min, self.to_max, self.from_min, self.from_max)
    }
}

impl From<[f64; 4]> for ValueRange {
    fn from(r: [f64; 4]) -> Self {
        Self::new(r[0], r[1], r[2], r[3])
    }
}

impl From<ValueRange> for [f64; 4] {
    fn from(r: ValueRange) -> Self {
        [r.from_min, r.from_max, r.to_min, r.to_max]
    }
}

/// Which direction to convert values in.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Direction {
    ToRaw,
    FromRaw,
}

/// Converts `values` with one range per value. An empty table passes values through unchanged.
pub(crate) fn convert(
    values: &[f64],
    ranges: &[ValueRange],
    direction: Direction,
) -> Result<Vec<f64>, Error> {
    if ranges.is_empty() {
        return Ok(values.to_vec());
    }

    if values.len() != ranges.len() {
        return Err(Error::DimensionMismatch(ranges.len(), values.len()));
    }

    values
        .iter()
        .zip(ranges)
        .map(|(v, range)| match direction {
            Direction::ToRaw => range.value_to_raw(*v),
            Direction::FromRaw => range.raw_to_value(*v),
        })
        .collect()
}
