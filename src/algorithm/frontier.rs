use bitvec::prelude::*;
use ndarray::Array2;
use rand::Rng;

use crate::spatial::MaskField;

/// Grid of frontier membership computed from scratch
///
/// Pixels closer than `radius` to any image border are never members:
/// their patch would leave the raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMask {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl EdgeMask {
    /// Whether the pixel is on the frontier
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.cols
            && self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Number of frontier pixels
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Frontier pixels in row-major order
    pub fn cells(&self) -> Vec<[usize; 2]> {
        self.bits
            .iter_ones()
            .map(|index| [index / self.cols, index % self.cols])
            .collect()
    }
}

/// Whether a single pixel belongs to the frontier under the current mask
///
/// Unknown, at least `radius` from every border, and with at least one known
/// 4-neighbour.
pub fn is_edge_pixel(mask: &MaskField, radius: usize, row: usize, col: usize) -> bool {
    let (rows, cols) = mask.dimensions();
    if row < radius || col < radius || row + radius >= rows || col + radius >= cols {
        return false;
    }
    if !mask.is_unknown(row, col) {
        return false;
    }

    row.checked_sub(1).is_some_and(|r| !mask.is_unknown(r, col))
        || !mask.is_unknown(row + 1, col)
        || col.checked_sub(1).is_some_and(|c| !mask.is_unknown(row, c))
        || !mask.is_unknown(row, col + 1)
}

/// Compute the frontier from scratch
pub fn compute_edge_mask(mask: &MaskField, radius: usize) -> EdgeMask {
    let (rows, cols) = mask.dimensions();
    let mut bits = bitvec![0; rows * cols];

    for row in radius..rows.saturating_sub(radius) {
        for col in radius..cols.saturating_sub(radius) {
            if is_edge_pixel(mask, radius, row, col) {
                bits.set(row * cols + col, true);
            }
        }
    }

    EdgeMask { bits, rows, cols }
}

/// Pick a frontier pixel uniformly at random, `None` when the frontier is empty
pub fn pick_candidate<R: Rng>(edge_mask: &EdgeMask, rng: &mut R) -> Option<[usize; 2]> {
    let cells = edge_mask.cells();
    if cells.is_empty() {
        return None;
    }
    cells.get(rng.random_range(0..cells.len())).copied()
}

/// Frontier maintained incrementally as pixels are committed
///
/// Clearing one mask bit can only change the membership of that pixel and
/// its four neighbours, so [`Frontier::refresh_around`] re-evaluates exactly
/// those cells. The result always equals [`compute_edge_mask`] on the same
/// mask. Members live in a dense list so uniform sampling and removal are
/// O(1); `slots` maps each pixel to its position in that list.
#[derive(Clone, Debug)]
pub struct Frontier {
    radius: usize,
    members: Vec<[usize; 2]>,
    slots: Array2<Option<usize>>,
}

impl Frontier {
    /// Build the frontier for the current mask state
    pub fn from_mask(mask: &MaskField, radius: usize) -> Self {
        let mut frontier = Self {
            radius,
            members: Vec::new(),
            slots: Array2::from_elem(mask.dimensions(), None),
        };
        for cell in compute_edge_mask(mask, radius).cells() {
            frontier.insert(cell);
        }
        frontier
    }

    /// Number of frontier pixels
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the frontier is empty
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the pixel is on the frontier
    pub fn contains(&self, row: usize, col: usize) -> bool {
        matches!(self.slots.get([row, col]), Some(Some(_)))
    }

    /// Current members in unspecified order
    pub fn members(&self) -> &[[usize; 2]] {
        &self.members
    }

    /// Re-evaluate a committed pixel and its 4-neighbourhood against the mask
    pub fn refresh_around(&mut self, mask: &MaskField, row: usize, col: usize) {
        let neighbours = [
            Some([row, col]),
            row.checked_sub(1).map(|r| [r, col]),
            Some([row + 1, col]),
            col.checked_sub(1).map(|c| [row, c]),
            Some([row, col + 1]),
        ];

        for [r, c] in neighbours.into_iter().flatten() {
            if is_edge_pixel(mask, self.radius, r, c) {
                self.insert([r, c]);
            } else {
                self.remove([r, c]);
            }
        }
    }

    /// Pick a member uniformly at random
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<[usize; 2]> {
        if self.members.is_empty() {
            return None;
        }
        self.members
            .get(rng.random_range(0..self.members.len()))
            .copied()
    }

    /// Materialise the frontier as an edge mask for comparison
    pub fn to_edge_mask(&self) -> EdgeMask {
        let (rows, cols) = self.slots.dim();
        let mut bits = bitvec![0; rows * cols];
        for &[row, col] in &self.members {
            bits.set(row * cols + col, true);
        }
        EdgeMask { bits, rows, cols }
    }

    fn insert(&mut self, cell: [usize; 2]) {
        let next = self.members.len();
        if let Some(slot) = self.slots.get_mut(cell) {
            if slot.is_none() {
                *slot = Some(next);
                self.members.push(cell);
            }
        }
    }

    fn remove(&mut self, cell: [usize; 2]) {
        let Some(index) = self.slots.get_mut(cell).and_then(Option::take) else {
            return;
        };

        self.members.swap_remove(index);
        if let Some(&moved) = self.members.get(index) {
            if let Some(slot) = self.slots.get_mut(moved) {
                *slot = Some(index);
            }
        }
    }
}

/// Which frontier rendition the engine maintains
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrontierStrategy {
    /// Update only the neighbourhood of each committed pixel
    #[default]
    Incremental,
    /// Recompute the whole edge mask after every commit
    FullScan,
}

/// Frontier state for either strategy behind one interface
#[derive(Clone, Debug)]
pub enum FrontierTracker {
    /// Incrementally maintained member set
    Incremental(Frontier),
    /// Edge mask rebuilt from scratch after each commit
    FullScan {
        /// Patch radius used for the border exclusion
        radius: usize,
        /// Most recently computed edge mask
        edge_mask: EdgeMask,
    },
}

impl FrontierTracker {
    /// Build the tracker for the current mask
    pub fn build(strategy: FrontierStrategy, mask: &MaskField, radius: usize) -> Self {
        match strategy {
            FrontierStrategy::Incremental => Self::Incremental(Frontier::from_mask(mask, radius)),
            FrontierStrategy::FullScan => Self::FullScan {
                radius,
                edge_mask: compute_edge_mask(mask, radius),
            },
        }
    }

    /// Bring the frontier up to date after `[row, col]` became known
    pub fn after_commit(&mut self, mask: &MaskField, row: usize, col: usize) {
        match self {
            Self::Incremental(frontier) => frontier.refresh_around(mask, row, col),
            Self::FullScan { radius, edge_mask } => *edge_mask = compute_edge_mask(mask, *radius),
        }
    }

    /// Uniformly random frontier pixel
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<[usize; 2]> {
        match self {
            Self::Incremental(frontier) => frontier.pick(rng),
            Self::FullScan { edge_mask, .. } => pick_candidate(edge_mask, rng),
        }
    }

    /// Number of frontier pixels
    pub fn len(&self) -> usize {
        match self {
            Self::Incremental(frontier) => frontier.len(),
            Self::FullScan { edge_mask, .. } => edge_mask.count(),
        }
    }

    /// Whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current frontier as an edge mask
    pub fn edge_mask(&self) -> EdgeMask {
        match self {
            Self::Incremental(frontier) => frontier.to_edge_mask(),
            Self::FullScan { edge_mask, .. } => edge_mask.clone(),
        }
    }
}
