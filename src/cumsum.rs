//! Running foreground counts along both mask axes, and the index searches
//! the measurer performs over them.

use serde::{Deserialize, Serialize};

use crate::mask::Mask;
use crate::types::MaskShape;

/// Which index wins when several positions share the maximum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Lowest index, i.e. where a cumulative count first reaches its total.
    #[default]
    First,
    /// Highest index.
    Last,
}

/// Horizontal (left to right, per row) and vertical (top to bottom, per
/// column) cumulative sums of a mask, both stored row-major.
#[derive(Debug, Clone)]
pub struct CumulativeSums {
    horizontal: Vec<u32>,
    vertical: Vec<u32>,
    shape: MaskShape,
}

impl CumulativeSums {
    pub fn new(mask: &Mask) -> Self {
        let shape = mask.shape();
        let mut horizontal = Vec::with_capacity(shape.len());
        let mut vertical = Vec::with_capacity(shape.len());

        for row in 0..shape.rows {
            let mut acc = 0u32;
            for (col, &v) in mask.row(row).iter().enumerate() {
                acc += u32::from(v);
                horizontal.push(acc);

                let above = if row == 0 {
                    0
                } else {
                    vertical[(row - 1) * shape.cols + col]
                };
                vertical.push(above + u32::from(v));
            }
        }

        Self {
            horizontal,
            vertical,
            shape,
        }
    }

    pub fn shape(&self) -> MaskShape {
        self.shape
    }

    /// Cumulative counts along row `row`, left to right.
    pub fn horizontal_row(&self, row: usize) -> &[u32] {
        let start = row * self.shape.cols;
        &self.horizontal[start..start + self.shape.cols]
    }

    /// Cumulative counts down column `col`, top to bottom.
    pub fn vertical_column(&self, col: usize) -> impl Iterator<Item = u32> + '_ {
        self.vertical
            .iter()
            .skip(col)
            .step_by(self.shape.cols.max(1))
            .take(self.shape.rows)
            .copied()
    }

    /// Foreground count of every row (the last horizontal column).
    pub fn row_totals(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.shape.rows).map(move |row| {
            self.horizontal_row(row).last().copied().unwrap_or(0)
        })
    }
}

/// Index of the first element equal to `target`, or 0 when none matches.
pub fn first_equal<I>(values: I, target: u32) -> usize
where
    I: IntoIterator<Item = u32>,
{
    values
        .into_iter()
        .position(|v| v == target)
        .unwrap_or(0)
}

/// Index of the maximum element, or 0 for an empty input.
pub fn arg_max<I>(values: I, tie: TieBreak) -> usize
where
    I: IntoIterator<Item = u32>,
{
    let mut best: Option<(usize, u32)> = None;
    for (i, v) in values.into_iter().enumerate() {
        let better = match (best, tie) {
            (None, _) => true,
            (Some((_, b)), TieBreak::First) => v > b,
            (Some((_, b)), TieBreak::Last) => v >= b,
        };
        if better {
            best = Some((i, v));
        }
    }
    best.map_or(0, |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mask {
        // 0 1 1
        // 1 0 1
        // 0 0 1
        Mask::new(vec![0, 1, 1, 1, 0, 1, 0, 0, 1], MaskShape::new(3, 3)).unwrap()
    }

    #[test]
    fn horizontal_sums_accumulate_per_row() {
        let sums = CumulativeSums::new(&sample());
        assert_eq!(sums.horizontal_row(0), &[0, 1, 2]);
        assert_eq!(sums.horizontal_row(1), &[1, 1, 2]);
        assert_eq!(sums.horizontal_row(2), &[0, 0, 1]);
        assert_eq!(sums.row_totals().collect::<Vec<_>>(), vec![2, 2, 1]);
    }

    #[test]
    fn vertical_sums_accumulate_per_column() {
        let sums = CumulativeSums::new(&sample());
        assert_eq!(sums.vertical_column(0).collect::<Vec<_>>(), vec![0, 1, 1]);
        assert_eq!(sums.vertical_column(1).collect::<Vec<_>>(), vec![1, 1, 1]);
        assert_eq!(sums.vertical_column(2).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn first_equal_defaults_to_zero() {
        assert_eq!(first_equal([0, 0, 1, 2], 1), 2);
        assert_eq!(first_equal([0, 0, 0], 1), 0);
        assert_eq!(first_equal([2, 3], 1), 0);
    }

    #[test]
    fn arg_max_tie_breaking() {
        let column = [0, 1, 2, 3, 3, 3];
        assert_eq!(arg_max(column, TieBreak::First), 3);
        assert_eq!(arg_max(column, TieBreak::Last), 5);
        assert_eq!(arg_max([0, 0, 0], TieBreak::First), 0);
        assert_eq!(arg_max(std::iter::empty(), TieBreak::Last), 0);
    }
}
