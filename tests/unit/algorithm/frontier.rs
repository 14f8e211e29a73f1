//! Tests for frontier detection and incremental maintenance

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use texfill::algorithm::frontier::{
        Frontier, FrontierStrategy, FrontierTracker, compute_edge_mask, is_edge_pixel,
        pick_candidate,
    };
    use texfill::spatial::MaskField;

    // Tests only the ring of a square hole is on the frontier
    // Verified by treating diagonal neighbours as adjacent
    #[test]
    fn test_edge_mask_square_hole() {
        let mask = MaskField::known(10, 10).with_hole(3, 3, 4, 4);
        let edge = compute_edge_mask(&mask, 1);

        assert_eq!(edge.count(), 12);
        assert!(edge.contains(3, 3));
        assert!(edge.contains(6, 4));
        assert!(!edge.contains(4, 4));
        assert!(!edge.contains(2, 3));
    }

    // Tests pixels within the radius of a border never qualify
    // Verified by dropping the border exclusion
    #[test]
    fn test_edge_mask_excludes_border() {
        let mask = MaskField::known(8, 8).with_hole(0, 0, 3, 3);

        assert!(!is_edge_pixel(&mask, 1, 0, 2));
        assert!(!is_edge_pixel(&mask, 1, 2, 0));
        assert!(is_edge_pixel(&mask, 1, 2, 2));
        assert!(is_edge_pixel(&mask, 1, 1, 2));
        assert_eq!(compute_edge_mask(&mask, 1).cells(), vec![[1, 2], [2, 1], [2, 2]]);
        assert!(compute_edge_mask(&mask, 3).is_empty());
    }

    // Tests a fully unknown mask has no frontier
    // Verified by counting out-of-range neighbours as known
    #[test]
    fn test_edge_mask_without_known_pixels() {
        let mask = MaskField::from_fn(5, 5, |_, _| true);
        assert!(compute_edge_mask(&mask, 1).is_empty());
    }

    // Tests the incremental frontier matches a full rescan after every commit
    // Verified by refreshing only the committed pixel
    #[test]
    fn test_incremental_matches_full_scan() {
        let mut mask = MaskField::known(12, 12)
            .with_hole(2, 2, 5, 7)
            .with_hole(6, 5, 5, 3);
        let radius = 2;
        let mut frontier = Frontier::from_mask(&mask, radius);
        let mut rng = StdRng::seed_from_u64(7);

        while let Some([row, col]) = frontier.pick(&mut rng) {
            assert!(mask.clear(row, col));
            frontier.refresh_around(&mask, row, col);
            assert_eq!(frontier.to_edge_mask(), compute_edge_mask(&mask, radius));
            assert_eq!(frontier.len(), frontier.members().len());
        }

        // Pixels left behind sit within the radius of a border
        for [row, col] in mask.unknown_cells() {
            assert!(row < radius || col < radius || row + radius >= 12 || col + radius >= 12);
        }
    }

    // Tests both tracker strategies evolve identically
    // Verified by skipping the rebuild in the full-scan branch
    #[test]
    fn test_tracker_strategies_agree() {
        let mut mask = MaskField::known(9, 9).with_hole(2, 3, 4, 4);
        let mut incremental = FrontierTracker::build(FrontierStrategy::Incremental, &mask, 1);
        let mut full = FrontierTracker::build(FrontierStrategy::FullScan, &mask, 1);

        for [row, col] in [[2, 3], [2, 4], [3, 3], [5, 6]] {
            mask.clear(row, col);
            incremental.after_commit(&mask, row, col);
            full.after_commit(&mask, row, col);
            assert_eq!(incremental.edge_mask(), full.edge_mask());
            assert_eq!(incremental.len(), full.len());
        }
    }

    // Tests picks always land on the frontier and empty frontiers pick nothing
    // Verified by sampling from the whole grid
    #[test]
    fn test_pick_candidate() {
        let mask = MaskField::known(7, 7).with_hole(2, 2, 3, 3);
        let edge = compute_edge_mask(&mask, 1);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let [row, col] = pick_candidate(&edge, &mut rng).unwrap();
            assert!(edge.contains(row, col));
        }

        let empty = compute_edge_mask(&MaskField::known(7, 7), 1);
        assert_eq!(pick_candidate(&empty, &mut rng), None);
        assert!(FrontierTracker::build(FrontierStrategy::Incremental, &MaskField::known(7, 7), 1).is_empty());
    }
}
