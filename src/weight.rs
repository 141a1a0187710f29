//! Live-weight estimate from centimeter body measurements.

use serde::{Deserialize, Serialize};

use crate::types::BodyMeasurements;

/// Linear regression of live weight (kg) on body length, shoulder height and
/// sacrum height (cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightModel {
    pub body_length: f64,
    pub shoulder_height: f64,
    pub sacrum_height: f64,
    pub intercept: f64,
}

impl Default for WeightModel {
    /// Coefficients fitted on the goat herd the masks were collected from.
    fn default() -> Self {
        Self {
            body_length: 0.45287999,
            shoulder_height: 0.55532975,
            sacrum_height: 1.30813392,
            intercept: -111.45145379928671,
        }
    }
}

impl WeightModel {
    pub fn predict(&self, cm: &BodyMeasurements<f64>) -> f64 {
        cm.body_length * self.body_length
            + cm.sacrum_height * self.sacrum_height
            + cm.shoulder_height * self.shoulder_height
            + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_measurements_give_intercept() {
        let model = WeightModel::default();
        let w = model.predict(&BodyMeasurements::default());
        assert!((w - model.intercept).abs() < 1e-12);
    }

    #[test]
    fn typical_goat() {
        let cm = BodyMeasurements::new(80.0, 70.0, 72.0);
        let w = WeightModel::default().predict(&cm);
        let expected = 80.0 * 0.45287999 + 72.0 * 1.30813392 + 70.0 * 0.55532975
            - 111.45145379928671;
        assert!((w - expected).abs() < 1e-9);
        assert!(w > 0.0);
    }
}
