//! # goat-measure
//!
//! Linear body measurements of livestock from a binary silhouette mask.
//!
//! This crate provides:
//! - **Run-length encoding**: [`rle::encode`] and the longest-run search the
//!   measurer scans the base line with
//! - **Landmark measurement**: body length, shoulder height and sacrum height
//!   in mask pixels, plus every landmark coordinate used to derive them
//! - **Unit conversion**: mask pixels to centimeters from capture distance and
//!   a camera calibration
//! - **Weight estimate**: a linear regression on the centimeter measurements
//! - **Overlay**: an RGB debug rendering of the measurement geometry
//!
//! ## Mask convention
//!
//! Masks are row-major with rows along the vertical axis. The animal must
//! face left (head toward column 0) and the mask must have the configured
//! shape, 640 rows by 480 columns by default. The orientation is not checked.
//!
//! ## Quick Start
//!
//! ```rust
//! use goat_measure::{BodyMeasurements, Calibration, LandmarkMeasurer, Mask, MaskShape};
//!
//! // A block standing in for an animal.
//! let mask = Mask::from_fn(MaskShape::new(640, 480), |row, col| {
//!     (300..340).contains(&row) && (100..400).contains(&col)
//! });
//!
//! let measurement = LandmarkMeasurer::default().measure(&mask).unwrap();
//! assert_eq!(measurement.landmarks.span.start, 100);
//!
//! let pixels = measurement.pixels.map(|v| v as f64);
//! let cm: BodyMeasurements<f64> = Calibration::default()
//!     .convert_to_cm(pixels, 1.5)
//!     .unwrap();
//! println!("body length: {:.1} cm", cm.body_length);
//! ```

pub mod config;
pub mod convert;
pub mod cumsum;
mod error;
pub mod mask;
pub mod measure;
pub mod overlay;
pub mod rle;
mod types;
pub mod weight;

pub use config::Config;
pub use convert::{Calibration, ScaleAxis};
pub use cumsum::TieBreak;
pub use error::{Error, Result};
pub use mask::Mask;
pub use measure::{
    body_measurement, CenterLine, LandmarkColumn, LandmarkMeasurer, Landmarks, MeasureConfig,
    Measurement, MeasurementWarning,
};
pub use rle::{longest_run, Run, Runs};
pub use types::{BodyMeasurements, MaskShape, Point, Span};
pub use weight::WeightModel;
