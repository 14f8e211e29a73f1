//! Synthesis constants and runtime configuration defaults

/// Half-width of the square neighbourhood compared during matching
pub const DEFAULT_PATCH_RADIUS: usize = 7;

// Batch size bounds mirror a "pixels per frame" speed control
/// Default number of synthesis steps per scheduling quantum
pub const DEFAULT_STEPS_PER_BATCH: usize = 5;
/// Smallest accepted batch size
pub const MIN_STEPS_PER_BATCH: usize = 1;
/// Largest accepted batch size
pub const MAX_STEPS_PER_BATCH: usize = 50;

/// Fixed seed for reproducible synthesis
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// File naming
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_filled";
/// Suffix identifying the hole mask that accompanies an input image
pub const MASK_SUFFIX: &str = "_mask";
/// Suffix added to fill animation filenames
pub const VISUALIZATION_SUFFIX: &str = "_fill";

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Number of committed pixels folded into one animation frame
pub const PIXELS_PER_FRAME: usize = 25;
