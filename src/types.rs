use std::fmt;

use serde::{Deserialize, Serialize};

/// Dimensions of a 2D grid as (rows, cols), i.e. (height, width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskShape {
    pub rows: usize,
    pub cols: usize,
}

impl MaskShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Default for MaskShape {
    /// The segmentation model's output resolution: 640 rows by 480 columns.
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl fmt::Display for MaskShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A pixel position. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A half-open pixel interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// The three linear body measurements.
///
/// `T` is `i64` for pixel deltas straight out of the mask and `f64` once
/// converted to centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyMeasurements<T> {
    pub body_length: T,
    pub shoulder_height: T,
    pub sacrum_height: T,
}

impl<T> BodyMeasurements<T> {
    pub const fn new(body_length: T, shoulder_height: T, sacrum_height: T) -> Self {
        Self {
            body_length,
            shoulder_height,
            sacrum_height,
        }
    }

    /// Apply `f` to each measurement, keeping field order.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> BodyMeasurements<U> {
        BodyMeasurements {
            body_length: f(self.body_length),
            shoulder_height: f(self.shoulder_height),
            sacrum_height: f(self.sacrum_height),
        }
    }

    /// (name, value) pairs in field order.
    pub fn named(&self) -> [(&'static str, &T); 3] {
        [
            ("body_length", &self.body_length),
            ("shoulder_height", &self.shoulder_height),
            ("sacrum_height", &self.sacrum_height),
        ]
    }
}

impl<T> From<(T, T, T)> for BodyMeasurements<T> {
    fn from((body_length, shoulder_height, sacrum_height): (T, T, T)) -> Self {
        Self::new(body_length, shoulder_height, sacrum_height)
    }
}

impl<T> From<BodyMeasurements<T>> for (T, T, T) {
    fn from(m: BodyMeasurements<T>) -> Self {
        (m.body_length, m.shoulder_height, m.sacrum_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_shape_display() {
        let shape = MaskShape::default();
        assert_eq!(shape.to_string(), "640x480");
        assert_eq!(shape.len(), 640 * 480);
        assert!(!shape.is_empty());
        assert!(MaskShape::new(0, 10).is_empty());
    }

    #[test]
    fn span_length() {
        let span = Span::new(100, 400);
        assert_eq!(span.len(), 300);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }

    #[test]
    fn measurements_map_and_tuple() {
        let px = BodyMeasurements::new(10i64, 20, 30);
        let doubled = px.map(|v| v as f64 * 2.0);
        assert_eq!(doubled.body_length, 20.0);
        assert_eq!(doubled.sacrum_height, 60.0);

        let tuple: (i64, i64, i64) = px.into();
        assert_eq!(tuple, (10, 20, 30));
        assert_eq!(BodyMeasurements::from(tuple), px);

        let names: Vec<_> = px.named().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["body_length", "shoulder_height", "sacrum_height"]);
    }
}
