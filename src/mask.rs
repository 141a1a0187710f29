//! Binary silhouette masks.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::MaskShape;

/// A row-major binary grid where 1 marks the animal and 0 the background.
///
/// Rows run along the vertical (Y) axis and columns along the horizontal
/// (X) axis. The animal is expected to face left: head toward column 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<u8>,
    shape: MaskShape,
}

impl Mask {
    /// Wrap a row-major buffer of 0/1 values.
    pub fn new(data: Vec<u8>, shape: MaskShape) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(Error::InvalidMask(format!(
                "buffer holds {} values but shape {} needs {}",
                data.len(),
                shape,
                shape.len()
            )));
        }
        if let Some(pos) = data.iter().position(|&v| v > 1) {
            return Err(Error::InvalidMask(format!(
                "value {} at row {}, column {} is not binary",
                data[pos],
                pos / shape.cols,
                pos % shape.cols
            )));
        }
        Ok(Self { data, shape })
    }

    /// Build a mask by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(shape: MaskShape, f: F) -> Self
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut data = Vec::with_capacity(shape.len());
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                data.push(u8::from(f(row, col)));
            }
        }
        Self { data, shape }
    }

    /// An all-background mask.
    pub fn zeros(shape: MaskShape) -> Self {
        Self {
            data: vec![0; shape.len()],
            shape,
        }
    }

    /// Binarise a grayscale image: pixels strictly above `threshold` are foreground.
    pub fn from_luma(image: &image::GrayImage, threshold: u8) -> Self {
        let shape = MaskShape::new(image.height() as usize, image.width() as usize);
        let data = image
            .as_raw()
            .iter()
            .map(|&v| u8::from(v > threshold))
            .collect();
        Self { data, shape }
    }

    /// Decode a mask image from disk. Colour images are converted to luma first.
    pub fn open<P: AsRef<Path>>(path: P, threshold: u8) -> Result<Self> {
        let img = image::open(path)?;
        Ok(Self::from_luma(&img.to_luma8(), threshold))
    }

    /// Render as a grayscale image with foreground at 255.
    pub fn to_luma(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.shape.cols as u32, self.shape.rows as u32, |x, y| {
            image::Luma([self.get(y as usize, x as usize) * 255])
        })
    }

    pub fn shape(&self) -> MaskShape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Cell value at (row, col). Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.shape.cols + col]
    }

    /// A full row as a slice.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.shape.cols;
        &self.data[start..start + self.shape.cols]
    }

    /// Number of foreground cells.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// Fail with [`Error::ShapeMismatch`] unless the mask has exactly `expected` shape.
    pub fn ensure_shape(&self, expected: MaskShape) -> Result<()> {
        if self.shape != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: self.shape,
            });
        }
        Ok(())
    }
}
