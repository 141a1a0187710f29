//! Conversion of mask-space pixel measurements to centimeters.
//!
//! Two steps: a linear rescale from mask resolution to the resolution of the
//! original photo, then a pinhole-style scale from photo pixels to
//! centimeters. The second step is calibrated from a reference shot taken
//! `distance_cm` away, in which one centimeter spans `factor` pixels; at
//! capture distance `d` meters a centimeter spans proportionally fewer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BodyMeasurements, MaskShape};

/// Photo axis used to rescale a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleAxis {
    /// Horizontal axis (columns).
    #[default]
    Width,
    /// Vertical axis (rows), including the tilt correction.
    Height,
}

/// Camera calibration and resolution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Pixels per centimeter in the reference shot.
    pub factor: f64,
    /// Distance of the reference shot in centimeters.
    pub distance_cm: f64,
    /// Resolution of the original photo.
    pub original_shape: MaskShape,
    /// Resolution of the mask the measurements were taken on.
    pub mask_shape: MaskShape,
    /// Camera pitch in degrees. Vertical measurements are divided by its cosine.
    pub tilt_degrees: f64,
    /// Axis used to rescale the sacrum height. Shoulder height always uses
    /// the vertical axis and body length the horizontal one.
    pub sacrum_axis: ScaleAxis,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            factor: 155.42,
            distance_cm: 20.0,
            original_shape: MaskShape::new(4032, 3024),
            mask_shape: MaskShape::new(640, 480),
            tilt_degrees: 0.0,
            sacrum_axis: ScaleAxis::Width,
        }
    }
}

impl Calibration {
    /// Rescale a horizontal pixel count from mask to photo resolution.
    pub fn scale_to_width(&self, pixels: f64) -> Result<f64> {
        let mask_cols = divisor("mask_shape.cols", self.mask_shape.cols as f64)?;
        Ok(pixels / mask_cols * self.original_shape.cols as f64)
    }

    /// Rescale a vertical pixel count from mask to photo resolution,
    /// correcting for camera tilt.
    pub fn scale_to_height(&self, pixels: f64) -> Result<f64> {
        let mask_rows = divisor("mask_shape.rows", self.mask_shape.rows as f64)?;
        let scaled = pixels / mask_rows * self.original_shape.rows as f64;
        if self.tilt_degrees == 0.0 {
            return Ok(scaled);
        }
        let cos = divisor("cos(tilt_degrees)", self.tilt_degrees.to_radians().cos())?;
        Ok(scaled / cos)
    }

    /// Rescale along the given axis.
    pub fn scale(&self, axis: ScaleAxis, pixels: f64) -> Result<f64> {
        match axis {
            ScaleAxis::Width => self.scale_to_width(pixels),
            ScaleAxis::Height => self.scale_to_height(pixels),
        }
    }

    /// Convert photo pixels to centimeters at `distance` meters.
    pub fn pixels_to_cm(&self, pixels: f64, distance: f64) -> Result<f64> {
        let distance = divisor("distance", distance)?;
        let factor = divisor("calibration factor", self.factor)?;
        let reference = divisor("calibration distance", self.distance_cm)?;
        Ok(pixels / (factor * reference / (distance * 100.0)))
    }

    /// Convert all three mask-space measurements to centimeters.
    ///
    /// Body length is rescaled horizontally and shoulder height vertically;
    /// sacrum height follows [`Calibration::sacrum_axis`].
    pub fn convert_to_cm(
        &self,
        pixels: BodyMeasurements<f64>,
        distance: f64,
    ) -> Result<BodyMeasurements<f64>> {
        let body_length = self.scale_to_width(pixels.body_length)?;
        let shoulder_height = self.scale_to_height(pixels.shoulder_height)?;
        let sacrum_height = self.scale(self.sacrum_axis, pixels.sacrum_height)?;
        let cm = BodyMeasurements {
            body_length: self.pixels_to_cm(body_length, distance)?,
            shoulder_height: self.pixels_to_cm(shoulder_height, distance)?,
            sacrum_height: self.pixels_to_cm(sacrum_height, distance)?,
        };
        log::debug!(
            "converted {:?} px at {} m to {:?} cm",
            pixels,
            distance,
            cm
        );
        Ok(cm)
    }
}

fn divisor(name: &'static str, value: f64) -> Result<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(Error::ZeroDivisor { name });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn rescale_uses_axis_ratios() {
        let cal = Calibration::default();
        // 3024 / 480 = 6.3 and 4032 / 640 = 6.3
        assert!((cal.scale_to_width(100.0).unwrap() - 630.0).abs() < EPS);
        assert!((cal.scale_to_height(100.0).unwrap() - 630.0).abs() < EPS);

        let cal = Calibration {
            original_shape: MaskShape::new(1000, 300),
            mask_shape: MaskShape::new(100, 100),
            ..Calibration::default()
        };
        assert!((cal.scale_to_width(10.0).unwrap() - 30.0).abs() < EPS);
        assert!((cal.scale_to_height(10.0).unwrap() - 100.0).abs() < EPS);
        assert!((cal.scale(ScaleAxis::Height, 10.0).unwrap() - 100.0).abs() < EPS);
    }

    #[test]
    fn pixels_to_cm_reference_values() {
        let cal = Calibration::default();
        assert_eq!(cal.pixels_to_cm(0.0, 1.5).unwrap(), 0.0);

        // At the calibration distance one centimeter spans `factor` pixels.
        let at_reference = cal.pixels_to_cm(155.42, 0.2).unwrap();
        assert!((at_reference - 1.0).abs() < EPS);

        // Twice as far, twice as many centimeters per pixel.
        let far = cal.pixels_to_cm(155.42, 0.4).unwrap();
        assert!((far - 2.0).abs() < EPS);
    }

    #[test]
    fn zero_parameters_are_errors() {
        let cal = Calibration::default();
        assert!(matches!(
            cal.pixels_to_cm(10.0, 0.0),
            Err(Error::ZeroDivisor { name: "distance" })
        ));

        let cal = Calibration {
            factor: 0.0,
            ..Calibration::default()
        };
        assert!(matches!(
            cal.pixels_to_cm(10.0, 1.0),
            Err(Error::ZeroDivisor { name: "calibration factor" })
        ));

        let cal = Calibration {
            mask_shape: MaskShape::new(0, 0),
            ..Calibration::default()
        };
        assert!(cal.scale_to_width(1.0).is_err());
        assert!(cal.scale_to_height(1.0).is_err());

        let cal = Calibration {
            distance_cm: f64::NAN,
            ..Calibration::default()
        };
        assert!(cal.pixels_to_cm(1.0, 1.0).is_err());
    }

    #[test]
    fn tilt_stretches_vertical_measurements_only() {
        let cal = Calibration {
            tilt_degrees: 60.0,
            ..Calibration::default()
        };
        assert!((cal.scale_to_height(100.0).unwrap() - 1260.0).abs() < 1e-6);
        assert!((cal.scale_to_width(100.0).unwrap() - 630.0).abs() < EPS);

        let cal = Calibration {
            tilt_degrees: 90.0,
            ..Calibration::default()
        };
        // cos(90°) is not exactly zero in floating point, so this stays finite.
        assert!(cal.scale_to_height(1.0).unwrap().is_finite());
    }

    #[test]
    fn convert_reduces_to_rescale_with_unit_scale() {
        // factor * distance_cm / (distance * 100) == 1
        let cal = Calibration {
            factor: 5.0,
            distance_cm: 20.0,
            ..Calibration::default()
        };
        let px = BodyMeasurements::new(100.0, 50.0, 40.0);
        let cm = cal.convert_to_cm(px, 1.0).unwrap();
        assert!((cm.body_length - cal.scale_to_width(100.0).unwrap()).abs() < EPS);
        assert!((cm.shoulder_height - cal.scale_to_height(50.0).unwrap()).abs() < EPS);
        assert!((cm.sacrum_height - cal.scale_to_width(40.0).unwrap()).abs() < EPS);
    }

    #[test]
    fn sacrum_axis_selects_rescale() {
        let px = BodyMeasurements::new(0.0, 0.0, 64.0);
        let width = Calibration {
            original_shape: MaskShape::new(1280, 480),
            ..Calibration::default()
        };
        let height = Calibration {
            sacrum_axis: ScaleAxis::Height,
            ..width
        };
        let w = width.convert_to_cm(px, 0.2).unwrap().sacrum_height;
        let h = height.convert_to_cm(px, 0.2).unwrap().sacrum_height;
        assert!((w - 64.0 / 155.42).abs() < EPS);
        assert!((h - 128.0 / 155.42).abs() < EPS);
    }

    proptest! {
        #[test]
        fn width_rescale_inverts(pixels in 0.001f64..10_000.0) {
            let cal = Calibration::default();
            let scaled = cal.scale_to_width(pixels).unwrap();
            let back = scaled * cal.mask_shape.cols as f64 / cal.original_shape.cols as f64;
            prop_assert!((back - pixels).abs() <= pixels * 1e-12);
        }

        #[test]
        fn zero_pixels_are_zero_cm(distance in 0.01f64..100.0, factor in 0.1f64..1000.0) {
            let cal = Calibration { factor, ..Calibration::default() };
            prop_assert_eq!(cal.pixels_to_cm(0.0, distance).unwrap(), 0.0);
        }
    }
}
