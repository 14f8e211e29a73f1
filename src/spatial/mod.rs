//! Spatial data structures for the fill target
//!
//! This module contains:
//! - RGBA rasters and the source/working pixel buffer pair
//! - The hole mask tracking which pixels are still unknown
//! - Exemplar region validation and parsing

/// Hole mask over the working raster
pub mod mask;
/// Rasters and the source/working pixel buffer
pub mod raster;
/// Exemplar rectangle
pub mod region;

pub use mask::MaskField;
pub use raster::{Pixel, PixelBuffer, Raster};
pub use region::ExemplarRegion;
