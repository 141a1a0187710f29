//! Debug overlay of the measurement geometry on top of the mask.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::error::Result;
use crate::mask::Mask;
use crate::measure::{LandmarkColumn, Landmarks};

pub const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);
pub const FOREGROUND: Rgb<u8> = Rgb([90, 90, 90]);

pub const BASE: Rgb<u8> = Rgb([255, 0, 0]);
pub const SACRUM: Rgb<u8> = Rgb([0, 200, 0]);
pub const SHOULDER: Rgb<u8> = Rgb([0, 120, 255]);
pub const MIDDLE: Rgb<u8> = Rgb([255, 165, 0]);
pub const CENTER: Rgb<u8> = Rgb([255, 255, 0]);
pub const FRONT_FEED: Rgb<u8> = Rgb([0, 255, 255]);
pub const BACK_FEED: Rgb<u8> = Rgb([255, 0, 255]);
pub const SHOULDER_HEIGHT: Rgb<u8> = Rgb([0, 0, 180]);
pub const SACRUM_HEIGHT: Rgb<u8> = Rgb([0, 100, 0]);

/// Draw the base line, landmark columns, center line, feed lines and both
/// height segments over the mask.
pub fn render(mask: &Mask, landmarks: &Landmarks) -> RgbImage {
    let width = mask.cols() as u32;
    let height = mask.rows() as u32;
    let mut img = RgbImage::from_fn(width, height, |x, y| {
        if mask.get(y as usize, x as usize) == 1 {
            FOREGROUND
        } else {
            BACKGROUND
        }
    });

    let lm = landmarks;
    let right = width as f32;

    horizontal(&mut img, lm.base_row, lm.span.start as f32, lm.span.end as f32, BASE);
    vertical(&mut img, &lm.sacrum, SACRUM);
    vertical(&mut img, &lm.shoulder, SHOULDER);
    vertical(&mut img, &lm.middle, MIDDLE);
    horizontal(
        &mut img,
        lm.center.row,
        lm.center.start_col as f32,
        lm.center.end_col as f32,
        CENTER,
    );
    horizontal(&mut img, lm.front_feed.y, 0.0, right, FRONT_FEED);
    horizontal(&mut img, lm.back_feed.y, 0.0, right, BACK_FEED);
    segment(
        &mut img,
        lm.front_feed.x,
        lm.shoulder.start_row,
        lm.front_feed.y,
        SHOULDER_HEIGHT,
    );
    segment(
        &mut img,
        lm.back_feed.x,
        lm.sacrum.start_row,
        lm.back_feed.y,
        SACRUM_HEIGHT,
    );

    img
}

/// Render and write the overlay; the format follows the file extension.
pub fn save<P: AsRef<Path>>(mask: &Mask, landmarks: &Landmarks, path: P) -> Result<()> {
    render(mask, landmarks).save(path)?;
    Ok(())
}

fn horizontal(img: &mut RgbImage, row: usize, from: f32, to: f32, color: Rgb<u8>) {
    let y = row as f32;
    draw_line_segment_mut(img, (from, y), (to, y), color);
}

fn vertical(img: &mut RgbImage, column: &LandmarkColumn, color: Rgb<u8>) {
    segment(img, column.column, column.start_row, column.end_row, color);
}

fn segment(img: &mut RgbImage, col: usize, from_row: usize, to_row: usize, color: Rgb<u8>) {
    let x = col as f32;
    draw_line_segment_mut(img, (x, from_row as f32), (x, to_row as f32), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{LandmarkMeasurer, MeasureConfig};
    use crate::types::MaskShape;

    #[test]
    fn overlay_marks_heights_and_keeps_mask() {
        let shape = MaskShape::new(16, 20);
        let mask = Mask::from_fn(shape, |r, c| {
            let trunk = (4..8).contains(&r) && (2..18).contains(&c);
            let legs = (8..13).contains(&r) && ((4..6).contains(&c) || (14..16).contains(&c));
            trunk || legs
        });
        let measurer = LandmarkMeasurer::new(MeasureConfig {
            mask_shape: shape,
            base_row_offset: 1,
            ..MeasureConfig::default()
        });
        let m = measurer.measure(&mask).unwrap();
        let img = render(&mask, &m.landmarks);

        assert_eq!(img.dimensions(), (20, 16));
        let back = m.landmarks.back_feed;
        assert_eq!(back.x, 14);
        assert_eq!(*img.get_pixel(14, 9), SACRUM_HEIGHT);
        assert_eq!(*img.get_pixel(19, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(9, 10), BACKGROUND);
        assert_eq!(*img.get_pixel(16, 6), FOREGROUND);
    }
}
