//! Seeding: turns a raster image into the first generation.
//!
//! The image is shrunk to a small footprint, centered in the grid, and every
//! pixel darker than the luminance threshold becomes a living, colored cell.
//! Uniform random noise is scattered on top afterwards.

use image::{DynamicImage, RgbaImage, imageops::FilterType};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::{Cell, Grid, GridError, Rgb};

/// Default number of random living cells scattered over the grid
pub const DEFAULT_NOISE_POINTS: usize = 5000;
/// Default footprint width (in cells) of the seed image
pub const DEFAULT_FOOTPRINT_WIDTH: u32 = 60;
/// Pixels with `r + g + b` at or above this are background
pub const DEFAULT_LUMINANCE_THRESHOLD: u32 = 700;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to decode seed image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Seed image has no pixels")]
    EmptyImage,

    #[error("Pixel buffer holds {got} pixels, expected {expected}")]
    InvalidPixels { expected: usize, got: usize },

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

/// A decoded image as RGB triples, addressed `(i, j)` = (column, row)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl SourceImage {
    /// Wrap a row-major pixel buffer
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, SeedError> {
        if width == 0 || height == 0 {
            return Err(SeedError::EmptyImage);
        }
        if pixels.len() != width * height {
            return Err(SeedError::InvalidPixels {
                expected: width * height,
                got: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// An image filled with a single color
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, SeedError> {
        Self::from_pixels(width, height, vec![color; width * height])
    }

    /// Decode raw bytes (PNG, JPEG) and shrink to `footprint_width` columns
    pub fn decode(bytes: &[u8], footprint_width: u32) -> Result<Self, SeedError> {
        let image = image::load_from_memory(bytes)?;
        Self::normalize(&image, footprint_width)
    }

    /// Resize to `footprint_width` columns with proportional height.
    /// Transparent pixels are flattened onto white so they read as background.
    pub fn normalize(image: &DynamicImage, footprint_width: u32) -> Result<Self, SeedError> {
        let (w, h) = (image.width(), image.height());
        if w == 0 || h == 0 {
            return Err(SeedError::EmptyImage);
        }

        let target_w = footprint_width.max(1);
        let target_h = ((h as f64 * target_w as f64 / w as f64).round() as u32).max(1);
        let resized = image.resize_exact(target_w, target_h, FilterType::Triangle);
        debug!(from = ?(w, h), to = ?(target_w, target_h), "Normalized seed image");

        Ok(Self::from_rgba(&resized.to_rgba8()))
    }

    fn from_rgba(rgba: &RgbaImage) -> Self {
        let pixels = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                let a = a as u32;
                let flatten = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
                [flatten(r), flatten(g), flatten(b)]
            })
            .collect();

        Self {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            pixels,
        }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixel at column `i`, row `j`
    pub fn pixel(&self, i: usize, j: usize) -> Rgb {
        self.pixels[j * self.width + i]
    }
}

/// Offset that centers `inner` inside `outer`; negative when `inner` is larger
pub fn centered_offset(outer: usize, inner: usize) -> i64 {
    (outer as f64 / 2.0 - inner as f64 / 2.0).trunc() as i64
}

/// Builds the first generation from an image plus random noise
#[derive(Clone, Copy, Debug)]
pub struct ImageSeeder {
    pub noise_points: usize,
    pub luminance_threshold: u32,
}

impl Default for ImageSeeder {
    fn default() -> Self {
        Self {
            noise_points: DEFAULT_NOISE_POINTS,
            luminance_threshold: DEFAULT_LUMINANCE_THRESHOLD,
        }
    }
}

impl ImageSeeder {
    pub fn new(noise_points: usize) -> Self {
        Self { noise_points, ..Self::default() }
    }

    pub fn with_threshold(mut self, luminance_threshold: u32) -> Self {
        self.luminance_threshold = luminance_threshold;
        self
    }

    /// Whether a pixel is dark enough to become a living cell
    pub fn is_foreground(&self, rgb: Rgb) -> bool {
        rgb.iter().map(|&c| c as u32).sum::<u32>() < self.luminance_threshold
    }

    /// Seed a `width x height` grid: centered image first, then noise on top.
    pub fn seed<R: Rng + ?Sized>(
        &self,
        image: &SourceImage,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Grid, SeedError> {
        let mut grid = Grid::try_new(width, height)?;
        let placed = self.place_image(&mut grid, image);
        scatter_noise(&mut grid, self.noise_points, rng);

        info!(
            width,
            height,
            image_cells = placed,
            noise = self.noise_points,
            living = grid.live_count(),
            "Seeded grid"
        );
        Ok(grid)
    }

    /// Stamp the foreground pixels of `image` centered on `grid`.
    /// Pixels landing outside the grid are dropped. Returns the number placed.
    fn place_image(&self, grid: &mut Grid, image: &SourceImage) -> usize {
        let (img_w, img_h) = image.dimensions();
        let x_start = centered_offset(grid.width(), img_w);
        let y_start = centered_offset(grid.height(), img_h);

        let mut placed = 0;
        for i in 0..img_w {
            for j in 0..img_h {
                let rgb = image.pixel(i, j);
                if !self.is_foreground(rgb) {
                    continue;
                }
                let (x, y) = (x_start + i as i64, y_start + j as i64);
                if grid.put(x, y, Cell::colored(rgb)).is_ok() {
                    placed += 1;
                }
            }
        }
        placed
    }
}

/// Mark `count` uniformly random cells as living and colorless.
/// Repeated coordinates and overwritten image cells are expected.
pub fn scatter_noise<R: Rng + ?Sized>(grid: &mut Grid, count: usize, rng: &mut R) {
    let (w, h) = grid.dimensions();
    for _ in 0..count {
        let x = rng.random_range(0..w) as i64;
        let y = rng.random_range(0..h) as i64;
        // Always in range.
        let _ = grid.put(x, y, Cell::alive());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const BLACK: Rgb = [0, 0, 0];
    const WHITE: Rgb = [255, 255, 255];

    fn living(grid: &Grid) -> Vec<(usize, usize)> {
        grid.living_cells().map(|(x, y, _)| (x, y)).collect()
    }

    #[test]
    fn test_black_square_is_centered() {
        let image = SourceImage::filled(2, 2, BLACK).unwrap();
        let grid = ImageSeeder::new(0)
            .seed(&image, 10, 10, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(living(&grid), vec![(4, 4), (5, 4), (4, 5), (5, 5)]);
        assert_eq!(grid.get(4, 4).unwrap(), Cell::colored(BLACK));
    }

    #[test]
    fn test_white_image_places_nothing() {
        let image = SourceImage::filled(2, 2, WHITE).unwrap();
        let grid = ImageSeeder::new(0)
            .seed(&image, 10, 10, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let seeder = ImageSeeder::default();
        assert!(seeder.is_foreground([233, 233, 233])); // 699
        assert!(!seeder.is_foreground([234, 233, 233])); // 700
    }

    #[test]
    fn test_odd_sizes_truncate_like_float_math() {
        assert_eq!(centered_offset(100, 61), 19);
        assert_eq!(centered_offset(10, 2), 4);
        assert_eq!(centered_offset(4, 10), -3);
        assert_eq!(centered_offset(5, 10), -2);
    }

    #[test]
    fn test_oversized_image_is_clipped() {
        let image = SourceImage::filled(10, 10, BLACK).unwrap();
        let grid = ImageSeeder::new(0)
            .seed(&image, 4, 4, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(grid.live_count(), 16);
    }

    #[test]
    fn test_pixel_orientation() {
        // 3x1 image: only the rightmost pixel is dark.
        let image = SourceImage::from_pixels(3, 1, vec![WHITE, WHITE, [10, 20, 30]]).unwrap();
        let grid = ImageSeeder::new(0)
            .seed(&image, 7, 5, &mut StdRng::seed_from_u64(1))
            .unwrap();
        // x_start = trunc(3.5 - 1.5) = 2, y_start = trunc(2.5 - 0.5) = 2
        assert_eq!(living(&grid), vec![(4, 2)]);
        assert_eq!(grid.get(4, 2).unwrap().color, Some([10, 20, 30]));
    }

    #[test]
    fn test_noise_is_reproducible_with_seeded_rng() {
        let image = SourceImage::filled(2, 2, WHITE).unwrap();
        let seeder = ImageSeeder::new(50);
        let a = seeder.seed(&image, 20, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = seeder.seed(&image, 20, 20, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(a, b);
        assert!(a.live_count() >= 1 && a.live_count() <= 50);
        assert!(a.living_cells().all(|(_, _, cell)| cell.color.is_none()));
    }

    #[test]
    fn test_noise_lands_where_rng_points() {
        let mut expected_rng = StdRng::seed_from_u64(7);
        let mut expected = Vec::new();
        for _ in 0..5 {
            let x = expected_rng.random_range(0..8usize);
            let y = expected_rng.random_range(0..6usize);
            expected.push((x, y));
        }

        let mut grid = Grid::new(8, 6);
        scatter_noise(&mut grid, 5, &mut StdRng::seed_from_u64(7));
        for (x, y) in expected {
            assert!(grid.get(x, y).unwrap().is_alive());
        }
    }

    #[test]
    fn test_noise_overwrites_image_color() {
        let image = SourceImage::filled(1, 1, BLACK).unwrap();
        // A 1x1 grid: the image cell and every noise point share (0, 0).
        let grid = ImageSeeder::new(3)
            .seed(&image, 1, 1, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Cell::alive());
    }

    #[test]
    fn test_invalid_pixel_buffer() {
        assert!(matches!(
            SourceImage::from_pixels(2, 2, vec![BLACK; 3]),
            Err(SeedError::InvalidPixels { expected: 4, got: 3 })
        ));
        assert!(matches!(SourceImage::filled(0, 3, BLACK), Err(SeedError::EmptyImage)));
    }

    #[test]
    fn test_zero_sized_grid_is_rejected() {
        let image = SourceImage::filled(1, 1, BLACK).unwrap();
        let result = ImageSeeder::new(0).seed(&image, 0, 10, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(SeedError::Grid(GridError::InvalidGrid(_)))));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = SourceImage::decode(b"definitely not an image", 60);
        assert!(matches!(result, Err(SeedError::ImageDecode(_))));
    }

    #[test]
    fn test_normalize_keeps_aspect_ratio() {
        let image = DynamicImage::ImageRgb8(image::RgbImage::new(120, 60));
        let source = SourceImage::normalize(&image, 60).unwrap();
        assert_eq!(source.dimensions(), (60, 30));
        assert_eq!(source.pixel(0, 0), BLACK);
    }

    #[test]
    fn test_transparent_pixels_become_background() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        let source = SourceImage::normalize(&image, 4).unwrap();
        assert_eq!(source.pixel(1, 1), WHITE);
    }
}
