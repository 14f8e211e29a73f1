//! PNG loading and export for source rasters, hole masks and fill results

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{MaskField, Raster};
use std::path::Path;

/// Decode an image file into an RGBA raster
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Raster::from_rgba_image(&img.to_rgba8()))
}

/// Decode a hole mask image
///
/// Pixels with a non-zero red channel are unknown; everything else is kept
/// from the source.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_mask(path: &Path) -> Result<MaskField> {
    let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(MaskField::from_red_channel(&img.to_rgba8()))
}

/// Export a raster as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_raster_as_png(raster: &Raster, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    raster
        .to_rgba_image()
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
