//! Difference Hash (dHash) implementation.
//!
//! 1. Resize the image to 9 x 8 with a Lanczos3 filter
//! 2. Take the luminance of every pixel
//! 3. For each row, compare each pixel to its right neighbour
//! 4. Bit `y * 8 + x` is set when pixel (x, y) is darker than (x + 1, y)
//!
//! The hash encodes brightness gradients rather than absolute values, so
//! it survives rescaling and mild recompression.

use super::traits::{DHash, ImageHasher};
use crate::error::HashError;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba};
use std::path::PathBuf;

/// Columns compared per row
const GRID: u32 = 8;

/// Difference hash producing 64-bit fingerprints
pub struct DifferenceHasher {
    filter: FilterType,
}

impl DifferenceHasher {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl Default for DifferenceHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Luminance of a 16-bit pixel, weighted 0.299 / 0.587 / 0.114.
///
/// Channels are premultiplied by alpha first, so transparent areas count
/// as dark.
fn luminance(pixel: &Rgba<u16>) -> u32 {
    let [r, g, b, a] = pixel.0.map(u64::from);
    let premultiply = |channel: u64| channel * a / u64::from(u16::MAX);
    ((premultiply(r) * 299 + premultiply(g) * 587 + premultiply(b) * 114) / 1000) as u32
}

impl ImageHasher for DifferenceHasher {
    type Hash = DHash;

    fn hash_image(&self, image: &DynamicImage) -> Result<DHash, HashError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(HashError::EmptyImage {
                path: PathBuf::new(),
            });
        }

        let resized = image.resize_exact(GRID + 1, GRID, self.filter).to_rgba16();

        let mut hash = 0u64;
        for y in 0..GRID {
            for x in 0..GRID {
                let left = luminance(resized.get_pixel(x, y));
                let right = luminance(resized.get_pixel(x + 1, y));
                if left < right {
                    hash |= 1 << (y * GRID + x);
                }
            }
        }

        Ok(DHash(hash))
    }
}
