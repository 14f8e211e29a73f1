//! Mathematical utilities for the algorithm

/// Random deviate transforms used for biased match selection
pub mod probability;
