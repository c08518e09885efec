//! Dominant color sampling
//!
//! The pixel grid is subsampled on a fixed lattice: every pixel whose x and y
//! coordinates are both multiples of the stride, starting at (0, 0). Sampled rows
//! are spread over the rayon pool. Each worker folds its rows into a private
//! [`ColorTally`]; the partial tallies are merged pairwise by `reduce`, so no
//! lock is taken and no increment can be lost. The winner is only read once the
//! reduction has returned.

use crate::error::ProcessingError;
use image::{DynamicImage, GenericImageView, Pixel};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// An 8-bit-per-channel RGB color, displayed as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor([r, g, b])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TallyEntry {
    count: u64,
    /// Row-major index of the first sample with this color.
    first_seen: u64,
}

/// Frequency table of sampled colors.
#[derive(Debug, Clone, Default)]
pub struct ColorTally {
    entries: HashMap<HexColor, TallyEntry>,
}

impl ColorTally {
    fn record(&mut self, color: HexColor, sample_index: u64) {
        self.entries
            .entry(color)
            .and_modify(|entry| {
                entry.count += 1;
                entry.first_seen = entry.first_seen.min(sample_index);
            })
            .or_insert(TallyEntry {
                count: 1,
                first_seen: sample_index,
            });
    }

    fn merge(mut self, other: ColorTally) -> ColorTally {
        for (color, theirs) in other.entries {
            self.entries
                .entry(color)
                .and_modify(|ours| {
                    ours.count += theirs.count;
                    ours.first_seen = ours.first_seen.min(theirs.first_seen);
                })
                .or_insert(theirs);
        }
        self
    }

    /// Number of samples recorded for `color`.
    pub fn count(&self, color: HexColor) -> u64 {
        self.entries.get(&color).map_or(0, |entry| entry.count)
    }

    /// Total number of samples across all colors.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|entry| entry.count).sum()
    }

    /// Number of distinct colors.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// The most frequent color.
    ///
    /// Ties go to the color that was sampled first in row-major order, which keeps
    /// the result independent of hash map iteration and of how rows were split
    /// across workers.
    pub fn most_frequent(&self) -> Option<HexColor> {
        self.entries
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.count
                    .cmp(&b.count)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(color, _)| *color)
    }
}

/// Tally the colors of every sampled pixel.
pub fn sample_tally(image: &DynamicImage, stride: u32) -> Result<ColorTally, ProcessingError> {
    if stride == 0 {
        return Err(ProcessingError::InvalidStride(stride));
    }

    let (width, height) = image.dimensions();
    let columns = width.div_ceil(stride);
    let rows = height.div_ceil(stride);

    let tally = (0..rows)
        .into_par_iter()
        .fold(ColorTally::default, |mut tally, row| {
            let y = row * stride;
            for column in 0..columns {
                let x = column * stride;
                let [r, g, b] = image.get_pixel(x, y).to_rgb().0;
                let sample_index = u64::from(row) * u64::from(columns) + u64::from(column);
                tally.record(HexColor::from_rgb(r, g, b), sample_index);
            }
            tally
        })
        .reduce(ColorTally::default, ColorTally::merge);

    Ok(tally)
}

/// Most frequent color among the pixels sampled at `stride`.
pub fn dominant_color(image: &DynamicImage, stride: u32) -> Result<HexColor, ProcessingError> {
    sample_tally(image, stride)?
        .most_frequent()
        .ok_or(ProcessingError::EmptyImage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(HexColor::from_rgb(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(HexColor::from_rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(HexColor::from_rgb(171, 205, 239).to_string(), "#abcdef");
    }

    #[test]
    fn test_solid_red_any_stride() {
        for (w, h) in [(1, 1), (3, 7), (64, 48), (100, 1)] {
            let img = solid(w, h, [255, 0, 0]);
            for stride in [1, 2, 3, 8, 50, 1000] {
                let color = dominant_color(&img, stride).unwrap();
                assert_eq!(color.to_string(), "#ff0000", "{}x{} stride {}", w, h, stride);
            }
        }
    }

    #[test]
    fn test_skipped_outlier_is_ignored() {
        let mut buffer = RgbImage::from_pixel(16, 16, Rgb([10, 20, 30]));
        // (3, 5) is not on the stride-2 lattice
        buffer.put_pixel(3, 5, Rgb([255, 255, 255]));
        let img = DynamicImage::ImageRgb8(buffer);

        let tally = sample_tally(&img, 2).unwrap();
        assert_eq!(tally.count(HexColor::from_rgb(255, 255, 255)), 0);
        assert_eq!(dominant_color(&img, 2).unwrap().to_string(), "#0a141e");
    }

    #[test]
    fn test_sampled_majority_wins() {
        // Left 3 columns blue, right 1 column green: blue dominates.
        let buffer = RgbImage::from_fn(4, 4, |x, _| {
            if x < 3 {
                Rgb([0, 0, 255])
            } else {
                Rgb([0, 255, 0])
            }
        });
        let img = DynamicImage::ImageRgb8(buffer);
        assert_eq!(dominant_color(&img, 1).unwrap().to_string(), "#0000ff");
    }

    #[test]
    fn test_sample_count_matches_lattice() {
        let img = solid(10, 7, [0, 0, 0]);
        // x in {0,3,6,9}, y in {0,3,6}
        assert_eq!(sample_tally(&img, 3).unwrap().total(), 12);
        // Stride larger than the image still samples (0, 0)
        assert_eq!(sample_tally(&img, 64).unwrap().total(), 1);
    }

    #[test]
    fn test_tie_breaks_on_first_sample() {
        // Two columns, equal counts; (0, 0) is yellow so yellow wins.
        let buffer = RgbImage::from_fn(2, 6, |x, _| {
            if x == 0 {
                Rgb([255, 255, 0])
            } else {
                Rgb([0, 255, 255])
            }
        });
        let img = DynamicImage::ImageRgb8(buffer);
        for _ in 0..20 {
            assert_eq!(dominant_color(&img, 1).unwrap().to_string(), "#ffff00");
        }
    }

    #[test]
    fn test_deterministic() {
        let buffer = RgbImage::from_fn(97, 61, |x, y| {
            Rgb([(x * 7 % 5) as u8 * 40, (y * 3 % 4) as u8 * 50, ((x + y) % 3) as u8 * 80])
        });
        let img = DynamicImage::ImageRgb8(buffer);
        let first = dominant_color(&img, 2).unwrap();
        for _ in 0..10 {
            assert_eq!(dominant_color(&img, 2).unwrap(), first);
        }
    }

    #[test]
    fn test_alpha_is_ignored() {
        let buffer = RgbaImage::from_pixel(5, 5, Rgba([12, 34, 56, 0]));
        let img = DynamicImage::ImageRgba8(buffer);
        assert_eq!(dominant_color(&img, 1).unwrap().to_string(), "#0c2238");
    }

    #[test]
    fn test_sixteen_bit_reduced_to_eight() {
        let buffer = image::ImageBuffer::from_pixel(3, 3, Rgb([0xffffu16, 0, 0x8080]));
        let img = DynamicImage::ImageRgb16(buffer);
        assert_eq!(dominant_color(&img, 1).unwrap().to_string(), "#ff0080");
    }

    #[test]
    fn test_no_lost_updates_at_scale() {
        let buffer = RgbImage::from_fn(1000, 1000, |x, y| Rgb([(x % 4) as u8, (y % 3) as u8, 0]));
        let img = DynamicImage::ImageRgb8(buffer);

        let tally = sample_tally(&img, 1).unwrap();
        assert_eq!(tally.total(), 1_000_000);
        assert_eq!(tally.distinct(), 12);
    }

    #[test]
    fn test_zero_stride_rejected() {
        let img = solid(4, 4, [1, 1, 1]);
        assert!(matches!(
            dominant_color(&img, 0),
            Err(ProcessingError::InvalidStride(0))
        ));
    }

    #[test]
    fn test_empty_image() {
        let img = DynamicImage::new_rgb8(0, 0);
        assert!(matches!(
            dominant_color(&img, 1),
            Err(ProcessingError::EmptyImage)
        ));
    }
}
