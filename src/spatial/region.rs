//! Exemplar rectangle selection and validation

use std::fmt;
use std::str::FromStr;

use crate::io::error::{AlgorithmError, Result, configuration_error};

/// Rectangle of the source image used as texture to sample from
///
/// Uses image conventions: `x`/`width` run along columns, `y`/`height`
/// along rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExemplarRegion {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl ExemplarRegion {
    /// Create a region from its top-left corner and size
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the region lies entirely inside a `rows` x `cols` image
    pub const fn fits_within(&self, rows: usize, cols: usize) -> bool {
        match (self.x.checked_add(self.width), self.y.checked_add(self.height)) {
            (Some(right), Some(bottom)) => right <= cols && bottom <= rows,
            _ => false,
        }
    }

    /// Number of patch placements along (rows, cols) for the given radius
    pub const fn placements(&self, patch_radius: usize) -> (usize, usize) {
        let span = 2 * patch_radius;
        (
            self.height.saturating_sub(span),
            self.width.saturating_sub(span),
        )
    }

    /// Check the region against the source size and patch radius
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The region extends past the source bounds
    /// - Width or height is smaller than `2 * patch_radius + 1`
    pub fn validate(&self, rows: usize, cols: usize, patch_radius: usize) -> Result<()> {
        if !self.fits_within(rows, cols) {
            return Err(configuration_error(
                "region",
                self,
                &format!("must lie inside the {cols}x{rows} source image"),
            ));
        }

        let patch_size = 2 * patch_radius + 1;
        if self.width < patch_size || self.height < patch_size {
            return Err(configuration_error(
                "region",
                self,
                &format!(
                    "width and height must be at least {patch_size} for patch radius {patch_radius}"
                ),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ExemplarRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for ExemplarRegion {
    type Err = AlgorithmError;

    /// Parse `x,y,w,h`
    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| configuration_error("region", &s, &e))?;

        match parts.as_slice() {
            &[x, y, width, height] => Ok(Self::new(x, y, width, height)),
            _ => Err(configuration_error(
                "region",
                &s,
                &"expected four comma-separated values x,y,w,h",
            )),
        }
    }
}
