//! Hole mask over the working raster
//!
//! A set bit marks an unknown pixel. Bits are only ever cleared while a
//! synthesis run is in progress, so the number of unknown pixels never grows.

use bitvec::prelude::*;
use image::RgbaImage;

/// Boolean grid where `true` means the pixel still has to be synthesized
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskField {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl MaskField {
    /// Create a mask with every pixel known
    pub fn known(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a mask by evaluating `unknown(row, col)` for every pixel
    pub fn from_fn(rows: usize, cols: usize, mut unknown: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::known(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if unknown(row, col) {
                    mask.bits.set(row * cols + col, true);
                }
            }
        }
        mask
    }

    /// Mark every pixel inside the rectangle as unknown
    ///
    /// Cells falling outside the grid are ignored.
    pub fn with_hole(mut self, top: usize, left: usize, height: usize, width: usize) -> Self {
        for row in top..(top + height).min(self.rows) {
            for col in left..(left + width).min(self.cols) {
                self.bits.set(row * self.cols + col, true);
            }
        }
        self
    }

    /// Derive a mask from a mask image: a non-zero red channel marks a hole
    pub fn from_red_channel(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_fn(height as usize, width as usize, |row, col| {
            image.get_pixel(col as u32, row as u32).0[0] != 0
        })
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the pixel is still unknown; out-of-range cells read as known
    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.cols
            && self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Mark a pixel as known
    ///
    /// Returns `true` if the pixel was unknown before the call.
    pub fn clear(&mut self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let index = row * self.cols + col;
        let was_unknown = self.bits.get(index).as_deref() == Some(&true);
        self.bits.set(index, false);
        was_unknown
    }

    /// Count of unknown pixels
    pub fn count_unknown(&self) -> usize {
        self.bits.count_ones()
    }

    /// Coordinates of every unknown pixel in row-major order
    pub fn unknown_cells(&self) -> Vec<[usize; 2]> {
        self.bits
            .iter_ones()
            .map(|index| [index / self.cols, index % self.cols])
            .collect()
    }
}
