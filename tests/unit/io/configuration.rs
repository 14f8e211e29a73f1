//! Tests for synthesis configuration constants

#[cfg(test)]
mod tests {
    use texfill::io::configuration::{
        DEFAULT_PATCH_RADIUS, DEFAULT_SEED, DEFAULT_STEPS_PER_BATCH, GIF_FRAME_DELAY_MS,
        MASK_SUFFIX, MAX_INDIVIDUAL_PROGRESS_BARS, MAX_STEPS_PER_BATCH, MIN_STEPS_PER_BATCH,
        OUTPUT_SUFFIX, PIXELS_PER_FRAME, PROGRESS_BAR_WIDTH, VIEWER_MIN_FRAME_DELAY_MS,
        VISUALIZATION_SUFFIX,
    };

    // Tests the default patch is a 15x15 square
    // Verified by changing constant values
    #[test]
    fn test_default_patch_radius() {
        assert_eq!(DEFAULT_PATCH_RADIUS, 7);
        assert_eq!(2 * DEFAULT_PATCH_RADIUS + 1, 15);
    }

    // Tests the default batch size sits inside the accepted range
    // Verified by inverting the bounds
    #[test]
    fn test_batch_bounds() {
        assert_eq!(MIN_STEPS_PER_BATCH, 1);
        assert_eq!(MAX_STEPS_PER_BATCH, 50);
        assert!((MIN_STEPS_PER_BATCH..=MAX_STEPS_PER_BATCH).contains(&DEFAULT_STEPS_PER_BATCH));
    }

    // Tests seed value
    // Verified by changing seed
    #[test]
    fn test_default_seed() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests file suffixes are distinct so derived files never collide
    // Verified by reusing the output suffix for masks
    #[test]
    fn test_suffixes_distinct() {
        assert_eq!(OUTPUT_SUFFIX, "_filled");
        assert_eq!(MASK_SUFFIX, "_mask");
        assert_ne!(VISUALIZATION_SUFFIX, OUTPUT_SUFFIX);
        assert_ne!(VISUALIZATION_SUFFIX, MASK_SUFFIX);
    }

    // Tests progress and animation display constants
    // Verified by modifying display constants
    #[test]
    fn test_display_constants() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(PROGRESS_BAR_WIDTH, 50);
        assert!(GIF_FRAME_DELAY_MS < VIEWER_MIN_FRAME_DELAY_MS);
        assert!(PIXELS_PER_FRAME > 0);
    }
}
