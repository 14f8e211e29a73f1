use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::math::probability::{box_muller_cosine, half_normal_rank};

/// Seeded random source owned by a single synthesis engine
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `(0, 1]`, safe to take the logarithm of
    pub fn open_unit(&mut self) -> f64 {
        1.0 - self.rng.random::<f64>()
    }

    /// Uniform value in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Rank in `0..len` drawn from the folded normal distribution
    ///
    /// Rank 0 is the best match. Returns 0 for an empty range.
    pub fn half_normal_rank(&mut self, len: usize) -> usize {
        let u1 = self.open_unit();
        let u2 = self.unit();
        half_normal_rank(box_muller_cosine(u1, u2), len)
    }

    /// Access the underlying generator for uniform picks
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Score at the given rank of the ascending order, `None` if out of range
///
/// Uses an order-statistic selection instead of a full sort; the value
/// returned is the one a full ascending sort would hold at `rank`.
pub fn score_at_rank(scores: &Array2<u64>, rank: usize) -> Option<u64> {
    let mut flat: Vec<u64> = scores.iter().copied().collect();
    if rank >= flat.len() {
        return None;
    }
    let (_, &mut value, _) = flat.select_nth_unstable(rank);
    Some(value)
}

/// First cell holding `target` in row-major order
///
/// When several placements share a score only the first of them can ever be
/// returned for that score value.
pub fn first_match(scores: &Array2<u64>, target: u64) -> Option<[usize; 2]> {
    scores
        .indexed_iter()
        .find(|&(_, &score)| score == target)
        .map(|((i, j), _)| [i, j])
}

/// Choose an exemplar placement from the score grid
///
/// Draws a half-normal rank so the best match is favoured without being
/// chosen every time, which avoids visibly repeating seams. Returns the
/// score-grid index of the chosen placement, or `None` for an empty grid.
pub fn select_match(scores: &Array2<u64>, selector: &mut RandomSelector) -> Option<[usize; 2]> {
    if scores.is_empty() {
        return None;
    }
    let rank = selector.half_normal_rank(scores.len());
    let target = score_at_rank(scores, rank)?;
    first_match(scores, target)
}
