//! RGBA rasters and the source/working pixel buffer pair
//!
//! Pixels are addressed as `[row, col]` throughout the crate, matching the
//! `ndarray` layout. Conversion to and from `image::RgbaImage` swaps to the
//! `(x, y)` convention at the boundary only.

use image::{Rgba, RgbaImage};
use ndarray::{Array2, Axis, Slice};

use crate::io::error::{Result, invariant_error};
use crate::spatial::mask::MaskField;
use crate::spatial::region::ExemplarRegion;

/// A single RGBA pixel
pub type Pixel = [u8; 4];

/// Fully transparent black, used for unknown working pixels
pub const ZERO_PIXEL: Pixel = [0, 0, 0, 0];

/// Owned RGBA raster indexed by `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: Array2<Pixel>,
}

impl Raster {
    /// Create a raster filled with a single color
    pub fn filled(rows: usize, cols: usize, pixel: Pixel) -> Self {
        Self {
            pixels: Array2::from_elem((rows, cols), pixel),
        }
    }

    /// Build a raster by evaluating `f(row, col)` for every pixel
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        Self {
            pixels: Array2::from_shape_fn((rows, cols), |(row, col)| f(row, col)),
        }
    }

    /// Copy pixels out of a decoded image
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_fn(height as usize, width as usize, |row, col| {
            image.get_pixel(col as u32, row as u32).0
        })
    }

    /// Render the raster as an image suitable for encoding
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.cols() as u32, self.rows() as u32);
        for ((row, col), pixel) in self.pixels.indexed_iter() {
            image.put_pixel(col as u32, row as u32, Rgba(*pixel));
        }
        image
    }

    /// Number of pixel rows (image height)
    pub fn rows(&self) -> usize {
        self.pixels.nrows()
    }

    /// Number of pixel columns (image width)
    pub fn cols(&self) -> usize {
        self.pixels.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    /// Read a pixel, `None` outside the raster
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        self.pixels.get([row, col]).copied()
    }

    /// Overwrite a pixel, returning `false` outside the raster
    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) -> bool {
        self.pixels.get_mut([row, col]).map(|p| *p = pixel).is_some()
    }

    /// Copy out the pixels covered by a region
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the region is not inside the raster;
    /// callers validate regions before cropping.
    pub fn crop(&self, region: &ExemplarRegion) -> Result<Self> {
        if !region.fits_within(self.rows(), self.cols()) {
            return Err(invariant_error(
                "crop exemplar",
                &format!(
                    "{region} lies outside the {}x{} raster",
                    self.cols(),
                    self.rows()
                ),
            ));
        }
        let pixels = self
            .pixels
            .slice_axis(Axis(0), Slice::from(region.y..region.y + region.height))
            .slice_axis(Axis(1), Slice::from(region.x..region.x + region.width))
            .to_owned();
        Ok(Self { pixels })
    }

    /// Whether any pixel of this raster equals `pixel`
    pub fn contains_pixel(&self, pixel: Pixel) -> bool {
        self.pixels.iter().any(|&p| p == pixel)
    }
}

/// Immutable source raster paired with the mutable fill target
///
/// The working raster only ever changes through [`PixelBuffer::commit`] and
/// [`PixelBuffer::initialize_working`], so the source stays pristine for
/// exemplar cropping and resets.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    source: Raster,
    working: Raster,
}

impl PixelBuffer {
    /// Start with a working raster identical to the source
    pub fn new(source: Raster) -> Self {
        let working = source.clone();
        Self { source, working }
    }

    /// The untouched source raster
    pub const fn source(&self) -> &Raster {
        &self.source
    }

    /// The fill target
    pub const fn working(&self) -> &Raster {
        &self.working
    }

    /// Rebuild the working raster: source pixels where known, zero where unknown
    pub fn initialize_working(&mut self, mask: &MaskField) {
        let source = &self.source;
        self.working = Raster::from_fn(source.rows(), source.cols(), |row, col| {
            if mask.is_unknown(row, col) {
                ZERO_PIXEL
            } else {
                source.get(row, col).unwrap_or(ZERO_PIXEL)
            }
        });
    }

    /// Write a synthesized pixel into the working raster
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the coordinate is outside the raster.
    pub fn commit(&mut self, row: usize, col: usize, pixel: Pixel) -> Result<()> {
        if self.working.set(row, col, pixel) {
            Ok(())
        } else {
            Err(invariant_error(
                "commit pixel",
                &format!("[{row}, {col}] is outside the working raster"),
            ))
        }
    }
}
