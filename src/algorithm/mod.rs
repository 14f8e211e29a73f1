/// Batch scheduling of synthesis steps
pub mod driver;
/// Synthesis engine state machine and step loop
pub mod engine;
/// Fill frontier detection and maintenance
pub mod frontier;
/// Masked sum-of-squared-differences patch matching
pub mod matching;
/// Biased stochastic selection among near-best matches
pub mod selection;
