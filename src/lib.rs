//! Exemplar-based hole filling using Efros-Leung non-parametric texture synthesis
//!
//! Unknown pixels are filled one at a time from the boundary inwards. Each
//! one takes its color from the centre of an exemplar patch whose known
//! neighbourhood closely matches its own, picked with a bias towards the
//! best matches.

#![forbid(unsafe_code)]

/// Synthesis engine, frontier tracking, patch matching and match selection
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Probability helpers for biased rank sampling
pub mod math;
/// Rasters, hole masks and exemplar regions
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
