//! TOML configuration.
//!
//! Every table and key is optional; anything left out keeps its default.
//!
//! ```toml
//! [measure]
//! base_row_offset = 10
//! end_search = "first"
//!
//! [calibration]
//! factor = 155.42
//! distance_cm = 20.0
//! tilt_degrees = 0.0
//! sacrum_axis = "width"
//! original_shape = { rows = 4032, cols = 3024 }
//!
//! [weight]
//! intercept = -111.45
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert::Calibration;
use crate::error::Result;
use crate::measure::MeasureConfig;
use crate::weight::WeightModel;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub measure: MeasureConfig,
    pub calibration: Calibration,
    pub weight: WeightModel,
}

impl Config {
    /// Read and parse a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.measure.mask_shape != config.calibration.mask_shape {
            log::warn!(
                "measure.mask_shape {} differs from calibration.mask_shape {}",
                config.measure.mask_shape,
                config.calibration.mask_shape
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ScaleAxis;
    use crate::cumsum::TieBreak;
    use crate::types::MaskShape;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [measure]
            base_row_offset = 4
            end_search = "last"

            [calibration]
            factor = 200.0
            sacrum_axis = "height"
            original_shape = { rows = 1920, cols = 1440 }
            "#,
        )
        .unwrap();

        assert_eq!(config.measure.base_row_offset, 4);
        assert_eq!(config.measure.end_search, TieBreak::Last);
        assert_eq!(config.measure.shoulder_fraction, 0.25);
        assert_eq!(config.calibration.factor, 200.0);
        assert_eq!(config.calibration.distance_cm, 20.0);
        assert_eq!(config.calibration.sacrum_axis, ScaleAxis::Height);
        assert_eq!(config.calibration.original_shape, MaskShape::new(1920, 1440));
        assert_eq!(config.weight, WeightModel::default());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Config::from_toml_str("[measure\nbase_row_offset = ").is_err());
        assert!(Config::from_toml_str("[measure]\nbase_row_offset = \"ten\"").is_err());
    }
}
