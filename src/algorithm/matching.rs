use ndarray::{Array2, Zip};

use crate::io::error::{Result, invariant_error};
use crate::spatial::{MaskField, Pixel, Raster};

/// A known pixel of the query patch, stored by its offset from the patch corner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownSample {
    /// Row offset within the patch, `0..=2R`
    pub row: usize,
    /// Column offset within the patch, `0..=2R`
    pub col: usize,
    /// Color channels compared during matching (alpha is ignored)
    pub rgb: [u8; 3],
}

/// Square neighbourhood around a frontier pixel
///
/// Pixels come from the working raster, so neighbours synthesized earlier
/// take part in later comparisons. Only offsets whose mask bit is clear are
/// kept as samples; unknown offsets never contribute to a score.
#[derive(Clone, Debug)]
pub struct Patch {
    radius: usize,
    known: Array2<bool>,
    samples: Vec<KnownSample>,
}

impl Patch {
    /// Cut the patch centred at `[row, col]` out of the working raster
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the patch would leave the raster. The
    /// frontier never yields such centres.
    pub fn extract(
        working: &Raster,
        mask: &MaskField,
        center: [usize; 2],
        radius: usize,
    ) -> Result<Self> {
        let [row, col] = center;
        let (rows, cols) = working.dimensions();
        if row < radius || col < radius || row + radius >= rows || col + radius >= cols {
            return Err(invariant_error(
                "extract patch",
                &format!("radius {radius} patch at [{row}, {col}] leaves the {cols}x{rows} raster"),
            ));
        }

        let size = 2 * radius + 1;
        let top = row - radius;
        let left = col - radius;

        let known = Array2::from_shape_fn((size, size), |(k, l)| {
            !mask.is_unknown(top + k, left + l)
        });

        let mut samples = Vec::with_capacity(size * size);
        for ((k, l), &is_known) in known.indexed_iter() {
            if !is_known {
                continue;
            }
            let pixel = working.get(top + k, left + l).ok_or_else(|| {
                invariant_error("extract patch", &format!("no pixel at [{}, {}]", top + k, left + l))
            })?;
            samples.push(KnownSample {
                row: k,
                col: l,
                rgb: [pixel[0], pixel[1], pixel[2]],
            });
        }

        Ok(Self {
            radius,
            known,
            samples,
        })
    }

    /// Patch radius
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Side length, `2R + 1`
    pub const fn size(&self) -> usize {
        2 * self.radius + 1
    }

    /// Whether the offset is known and therefore compared
    pub fn is_known(&self, row: usize, col: usize) -> bool {
        self.known.get([row, col]).copied().unwrap_or(false)
    }

    /// Known pixels in row-major order
    pub fn samples(&self) -> &[KnownSample] {
        &self.samples
    }
}

/// Squared RGB distance between two pixels, alpha ignored
pub fn squared_rgb_distance(rgb: [u8; 3], pixel: Pixel) -> u64 {
    rgb.iter()
        .zip(pixel.iter())
        .map(|(&a, &b)| {
            let d = u64::from(a.abs_diff(b));
            d * d
        })
        .sum()
}

/// Masked SSD for the placement whose patch corner sits at `[i, j]` in the exemplar
///
/// `[i, j]` is the score-grid index; the exemplar pixel under patch offset
/// `(k, l)` is `[i + k, j + l]`. `None` when the patch would leave the
/// exemplar at this placement.
pub fn score_placement(patch: &Patch, exemplar: &Raster, placement: [usize; 2]) -> Option<u64> {
    let [i, j] = placement;
    let size = patch.size();
    if i + size > exemplar.rows() || j + size > exemplar.cols() {
        return None;
    }
    patch
        .samples
        .iter()
        .map(|sample| {
            exemplar
                .get(i + sample.row, j + sample.col)
                .map(|pixel| squared_rgb_distance(sample.rgb, pixel))
        })
        .sum()
}

/// Score grid dimensions for a patch of `radius` over an exemplar raster
pub const fn score_dimensions(exemplar_rows: usize, exemplar_cols: usize, radius: usize) -> (usize, usize) {
    (
        exemplar_rows.saturating_sub(2 * radius),
        exemplar_cols.saturating_sub(2 * radius),
    )
}

/// Score every placement of the patch inside the exemplar across worker threads
///
/// Placements are independent, so each cell is computed by exactly one task
/// and the grid is identical to [`compute_ssd_sequential`].
///
/// # Errors
///
/// Returns an invariant error if a placement reads outside the exemplar
pub fn compute_ssd(patch: &Patch, exemplar: &Raster) -> Result<Array2<u64>> {
    let (rows, cols) = exemplar.dimensions();
    let mut scores = Array2::from_elem(score_dimensions(rows, cols, patch.radius), None);

    Zip::indexed(&mut scores).par_for_each(|(i, j), score| {
        *score = score_placement(patch, exemplar, [i, j]);
    });

    collect_scores(scores)
}

/// Score every placement of the patch inside the exemplar on the calling thread
///
/// # Errors
///
/// Returns an invariant error if a placement reads outside the exemplar
pub fn compute_ssd_sequential(patch: &Patch, exemplar: &Raster) -> Result<Array2<u64>> {
    let (rows, cols) = exemplar.dimensions();
    collect_scores(Array2::from_shape_fn(
        score_dimensions(rows, cols, patch.radius),
        |(i, j)| score_placement(patch, exemplar, [i, j]),
    ))
}

fn collect_scores(scores: Array2<Option<u64>>) -> Result<Array2<u64>> {
    if let Some(((i, j), _)) = scores.indexed_iter().find(|(_, score)| score.is_none()) {
        return Err(invariant_error(
            "score placement",
            &format!("placement [{i}, {j}] reads outside the exemplar"),
        ));
    }
    Ok(scores.mapv(Option::unwrap_or_default))
}

/// How the placement scores are evaluated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Spread placements over the rayon thread pool
    #[default]
    Parallel,
    /// Evaluate placements on the calling thread
    Sequential,
}

impl MatchStrategy {
    /// Score every placement with this strategy
    ///
    /// # Errors
    ///
    /// Returns an invariant error if a placement reads outside the exemplar
    pub fn score(self, patch: &Patch, exemplar: &Raster) -> Result<Array2<u64>> {
        match self {
            Self::Parallel => compute_ssd(patch, exemplar),
            Self::Sequential => compute_ssd_sequential(patch, exemplar),
        }
    }
}
