use num_traits::ToPrimitive;
use std::f64::consts::TAU;

/// Standard normal deviate from two uniforms using the cosine branch of Box-Muller
///
/// `u1` must lie in `(0, 1]` for the logarithm to stay finite; `u2` may be
/// any value in `[0, 1)`. Only one of the two deviates the transform can
/// produce is returned.
pub fn box_muller_cosine(u1: f64, u2: f64) -> f64 {
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = TAU * u2;
    r * theta.cos()
}

/// Map a normal deviate onto a rank in `0..len`
///
/// Folding the deviate gives a half-normal draw, so ranks near zero are the
/// most likely and the tail decays quickly. Values beyond the last rank are
/// clamped onto it. Returns 0 for an empty range.
pub fn half_normal_rank(deviate: f64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    deviate
        .abs()
        .round()
        .to_usize()
        .map_or(last, |rank| rank.min(last))
}
