//! Body measurement from a left-facing silhouette mask.
//!
//! The measurer works entirely in mask pixel space:
//!
//! 1. Build horizontal and vertical cumulative foreground counts.
//! 2. Take the row with the most foreground, shifted down by a fixed offset,
//!    as the base line, and find its longest unbroken foreground run (the span).
//! 3. Place the shoulder, middle and sacrum columns at fixed fractions of the
//!    span and find the vertical foreground extent of each.
//! 4. Measure body length along a center row placed a fraction of the way
//!    down the middle column's extent.
//! 5. Find the lowest foreground pixel left of the middle column (front feet)
//!    and right of it (back feet). Shoulder and sacrum heights run from the
//!    top of their column down to the matching feet.
//!
//! The fractions and offsets are heuristics tuned on real masks and are
//! exposed through [`MeasureConfig`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::cumsum::{arg_max, first_equal, CumulativeSums, TieBreak};
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::rle::longest_run;
use crate::types::{BodyMeasurements, MaskShape, Point, Span};

/// Tunable constants of the landmark heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Shape every input mask must have.
    pub mask_shape: MaskShape,
    /// Rows added below the fullest row to get the base line.
    pub base_row_offset: usize,
    /// Shoulder column as a fraction of the span.
    pub shoulder_fraction: f64,
    /// Middle column as a fraction of the span.
    pub middle_fraction: f64,
    /// Sacrum column as a fraction of the span.
    pub sacrum_fraction: f64,
    /// Center row as a fraction of the middle column's vertical extent.
    pub center_fraction: f64,
    /// Tie-breaking for the "end" searches over cumulative sums.
    pub end_search: TieBreak,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            mask_shape: MaskShape::default(),
            base_row_offset: 10,
            shoulder_fraction: 0.25,
            middle_fraction: 0.5,
            sacrum_fraction: 0.75,
            center_fraction: 0.25,
            end_search: TieBreak::First,
        }
    }
}

/// A landmark column together with the vertical extent of foreground on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LandmarkColumn {
    pub column: usize,
    pub start_row: usize,
    pub end_row: usize,
}

/// The row body length is measured along, with its horizontal extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CenterLine {
    pub row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// Every intermediate coordinate the measurer derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Landmarks {
    pub base_row: usize,
    pub span: Span,
    pub shoulder: LandmarkColumn,
    pub middle: LandmarkColumn,
    pub sacrum: LandmarkColumn,
    pub center: CenterLine,
    pub front_feed: Point,
    pub back_feed: Point,
}

/// Signs that the mask did not look like a single left-facing animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementWarning {
    /// A landmark column has no foreground; its extent fell back to row 0.
    EmptyColumn { landmark: String, column: usize },
    /// A measurement came out negative.
    NegativeMeasurement { name: String, value: i64 },
}

/// Result of measuring one mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Pixel-space measurements.
    pub pixels: BodyMeasurements<i64>,
    pub landmarks: Landmarks,
    pub warnings: Vec<MeasurementWarning>,
}

impl Measurement {
    /// True when no degenerate geometry was observed.
    pub fn is_valid(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Landmark-based body measurer.
#[derive(Debug, Clone, Default)]
pub struct LandmarkMeasurer {
    config: MeasureConfig,
}

impl LandmarkMeasurer {
    pub fn new(config: MeasureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Measure a mask.
    ///
    /// Fails when the mask shape differs from the configured one, when a
    /// derived row or column falls outside the mask, or when either half of
    /// the mask has no foreground to take a feed point from.
    pub fn measure(&self, mask: &Mask) -> Result<Measurement> {
        let cfg = &self.config;
        mask.ensure_shape(cfg.mask_shape)?;

        let sums = CumulativeSums::new(mask);
        let mut warnings = Vec::new();

        let fullest_row = arg_max(sums.row_totals(), TieBreak::First);
        let base_row = check_index(
            "base_row",
            fullest_row.saturating_add(cfg.base_row_offset),
            mask.rows(),
        )?;

        let span = longest_run(mask.row(base_row));
        log::debug!("base row {}: span {}..{}", base_row, span.start, span.end);
        if span.is_empty() {
            log::warn!("base row {} has no foreground run", base_row);
        }

        let mut extent_at = |name, fraction| {
            self.column_extent(&sums, name, span, fraction, &mut warnings)
        };
        let shoulder = extent_at("shoulder", cfg.shoulder_fraction)?;
        let middle = extent_at("middle", cfg.middle_fraction)?;
        let sacrum = extent_at("sacrum", cfg.sacrum_fraction)?;

        let extent = middle.end_row as f64 - middle.start_row as f64;
        let center_row = (extent * cfg.center_fraction + middle.start_row as f64) as usize;
        let center_row = check_index("center", center_row, mask.rows())?;
        let center_sums = sums.horizontal_row(center_row);
        let center = CenterLine {
            row: center_row,
            start_col: first_equal(center_sums.iter().copied(), 1),
            end_col: arg_max(center_sums.iter().copied(), cfg.end_search),
        };
        log::debug!(
            "center row {}: columns {}..{}",
            center.row,
            center.start_col,
            center.end_col
        );

        let front_feed = lowest_foreground(mask, 0..middle.column)
            .ok_or(Error::EmptySection { section: "front" })?;
        let back_feed = lowest_foreground(mask, middle.column..mask.cols())
            .ok_or(Error::EmptySection { section: "back" })?;
        log::debug!("front feed {:?}, back feed {:?}", front_feed, back_feed);

        let pixels = BodyMeasurements::new(
            center.end_col as i64 - center.start_col as i64,
            front_feed.y as i64 - shoulder.start_row as i64,
            back_feed.y as i64 - sacrum.start_row as i64,
        );
        for (name, &value) in pixels.named() {
            log::debug!("{}: {} px", name, value);
            if value < 0 {
                warnings.push(MeasurementWarning::NegativeMeasurement {
                    name: name.to_string(),
                    value,
                });
            }
        }

        for warning in &warnings {
            log::warn!("degenerate mask geometry: {:?}", warning);
        }

        Ok(Measurement {
            pixels,
            landmarks: Landmarks {
                base_row,
                span,
                shoulder,
                middle,
                sacrum,
                center,
                front_feed,
                back_feed,
            },
            warnings,
        })
    }

    /// Place a landmark column at `fraction` of the span and find the
    /// vertical foreground extent on it.
    fn column_extent(
        &self,
        sums: &CumulativeSums,
        name: &'static str,
        span: Span,
        fraction: f64,
        warnings: &mut Vec<MeasurementWarning>,
    ) -> Result<LandmarkColumn> {
        let offset = (span.len() as f64 * fraction) as usize;
        let column = check_index(name, span.start + offset, sums.shape().cols)?;

        let total = sums.vertical_column(column).last().unwrap_or(0);
        if total == 0 {
            warnings.push(MeasurementWarning::EmptyColumn {
                landmark: name.to_string(),
                column,
            });
        }

        let extent = LandmarkColumn {
            column,
            start_row: first_equal(sums.vertical_column(column), 1),
            end_row: arg_max(sums.vertical_column(column), self.config.end_search),
        };
        log::debug!(
            "{} column {}: rows {}..{}",
            name,
            extent.column,
            extent.start_row,
            extent.end_row
        );
        Ok(extent)
    }
}

/// Measure with the default configuration, returning only the pixel triple.
pub fn body_measurement(mask: &Mask) -> Result<BodyMeasurements<i64>> {
    LandmarkMeasurer::default()
        .measure(mask)
        .map(|m| m.pixels)
}

fn check_index(landmark: &'static str, index: usize, limit: usize) -> Result<usize> {
    if index < limit {
        Ok(index)
    } else {
        Err(Error::OutOfBounds {
            landmark,
            index,
            limit,
        })
    }
}

/// The foreground pixel with the greatest row inside `cols`; the leftmost
/// one when that row holds several.
fn lowest_foreground(mask: &Mask, cols: Range<usize>) -> Option<Point> {
    (0..mask.rows()).rev().find_map(|row| {
        mask.row(row)[cols.clone()]
            .iter()
            .position(|&v| v == 1)
            .map(|offset| Point::new(cols.start + offset, row))
    })
}
