use log::{debug, info, warn};

use crate::{
    algorithm::frontier::{EdgeMask, FrontierStrategy, FrontierTracker},
    algorithm::matching::{MatchStrategy, Patch},
    algorithm::selection::{RandomSelector, select_match},
    io::configuration::{DEFAULT_PATCH_RADIUS, DEFAULT_SEED, DEFAULT_STEPS_PER_BATCH},
    io::error::{AlgorithmError, Result, configuration_error, invariant_error},
    io::visualization::FillCapture,
    spatial::{ExemplarRegion, MaskField, Pixel, PixelBuffer, Raster},
};

/// Synthesis parameters controlling matching and scheduling behaviour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Half-width of the compared neighbourhood (must be positive)
    pub patch_radius: usize,
    /// Steps advanced per scheduling quantum by batch-driven callers
    pub steps_per_batch: usize,
    /// Seed for frontier picks and match selection
    pub seed: u64,
    /// How the frontier is kept up to date
    pub frontier: FrontierStrategy,
    /// How placement scores are evaluated
    pub matching: MatchStrategy,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            patch_radius: DEFAULT_PATCH_RADIUS,
            steps_per_batch: DEFAULT_STEPS_PER_BATCH,
            seed: DEFAULT_SEED,
            frontier: FrontierStrategy::default(),
            matching: MatchStrategy::default(),
        }
    }
}

impl SynthesisConfig {
    /// Set the patch radius
    #[must_use]
    pub const fn with_patch_radius(mut self, patch_radius: usize) -> Self {
        self.patch_radius = patch_radius;
        self
    }

    /// Set the batch size used by batch-driven callers
    #[must_use]
    pub const fn with_steps_per_batch(mut self, steps_per_batch: usize) -> Self {
        self.steps_per_batch = steps_per_batch;
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the frontier strategy
    #[must_use]
    pub const fn with_frontier(mut self, frontier: FrontierStrategy) -> Self {
        self.frontier = frontier;
        self
    }

    /// Set the matching strategy
    #[must_use]
    pub const fn with_matching(mut self, matching: MatchStrategy) -> Self {
        self.matching = matching;
        self
    }

    /// Side length of the compared square
    pub const fn patch_size(&self) -> usize {
        2 * self.patch_radius + 1
    }

    /// Check parameters that do not depend on the images
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the patch radius is zero
    pub fn validate(&self) -> Result<()> {
        if self.patch_radius == 0 {
            return Err(configuration_error(
                "patch_radius",
                &self.patch_radius,
                &"must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a synthesis engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, `run` not yet called
    Idle,
    /// Steps are accepted
    Running,
    /// Suspended between steps
    Paused,
    /// No further work will be done until the next `run` or `reset`
    Complete,
}

impl EngineState {
    /// Lowercase name used in messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Complete => "complete",
        }
    }
}

/// Why a run finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// At most one unknown pixel is left
    ///
    /// The final pixel of a hole is never synthesized, so a fill that runs
    /// its course ends with `remaining() == 1`.
    Exhausted,
    /// The frontier emptied while more than one pixel was still unknown
    ///
    /// Happens when the remaining pixels all lie within the patch radius of
    /// an image border, where no frontier pixel can ever sit.
    NoCandidate {
        /// Pixels left unknown
        unreachable: usize,
    },
}

/// Record of one committed pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commit {
    /// Filled pixel row in the working raster
    pub row: usize,
    /// Filled pixel column in the working raster
    pub col: usize,
    /// Color written
    pub pixel: Pixel,
    /// Source-image coordinate `[row, col]` the color was copied from
    pub source: [usize; 2],
}

/// Efros-Leung hole filling engine
///
/// Owns the working raster, the hole mask and the frontier for one fill.
/// Each [`SynthesisEngine::step`] synthesizes at most one pixel; pacing is
/// left to the caller (see [`crate::algorithm::driver::BatchDriver`]).
pub struct SynthesisEngine {
    config: SynthesisConfig,
    pixels: PixelBuffer,
    /// Hole mask as supplied, restored on every run
    hole: MaskField,
    /// Hole mask shrinking as pixels are committed
    mask: MaskField,
    frontier: Option<FrontierTracker>,
    exemplar: Option<Raster>,
    region: Option<ExemplarRegion>,
    candidate: Option<[usize; 2]>,
    total: usize,
    remaining: usize,
    steps_taken: usize,
    state: EngineState,
    completion: Option<Completion>,
    last_commit: Option<Commit>,
    selector: RandomSelector,
    capture: Option<FillCapture>,
}

impl SynthesisEngine {
    /// Create an idle engine over a source raster and hole mask
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The patch radius is zero
    /// - Source and mask dimensions differ
    pub fn new(source: Raster, hole: MaskField, config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        check_dimensions(&source, &hole)?;

        Ok(Self {
            config,
            pixels: PixelBuffer::new(source),
            mask: hole.clone(),
            hole,
            frontier: None,
            exemplar: None,
            region: None,
            candidate: None,
            total: 0,
            remaining: 0,
            steps_taken: 0,
            state: EngineState::Idle,
            completion: None,
            last_commit: None,
            selector: RandomSelector::new(config.seed),
            capture: None,
        })
    }

    /// Start or restart synthesis sampling from `region`
    ///
    /// All validation happens before any state changes, so a rejected call
    /// leaves the working raster, mask and lifecycle state untouched.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The region leaves the source image
    /// - The region is smaller than one patch in either dimension
    /// - Source and mask dimensions differ
    pub fn run(&mut self, region: ExemplarRegion) -> Result<()> {
        check_dimensions(self.pixels.source(), &self.hole)?;
        let (rows, cols) = self.pixels.source().dimensions();
        region.validate(rows, cols, self.config.patch_radius)?;
        let exemplar = self.pixels.source().crop(&region)?;

        self.mask = self.hole.clone();
        self.pixels.initialize_working(&self.mask);
        self.total = self.mask.count_unknown();
        self.remaining = self.total;
        self.steps_taken = 0;
        self.completion = None;
        self.last_commit = None;
        self.selector = RandomSelector::new(self.config.seed);
        if let Some(capture) = self.capture.as_mut() {
            capture.restart(self.pixels.working().clone());
        }

        let frontier =
            FrontierTracker::build(self.config.frontier, &self.mask, self.config.patch_radius);
        self.candidate = frontier.pick(self.selector.rng());

        debug!(
            "Starting fill of {} pixels from exemplar {region} (radius {}, frontier {})",
            self.total,
            self.config.patch_radius,
            frontier.len()
        );

        self.frontier = Some(frontier);
        self.exemplar = Some(exemplar);
        self.region = Some(region);
        self.state = EngineState::Running;

        if self.total == 0 {
            self.finish();
        }

        Ok(())
    }

    /// Synthesize one pixel
    ///
    /// Returns `Ok(true)` while more work remains and `Ok(false)` once the
    /// run has completed. A call made with at most one unknown pixel left
    /// completes without committing; a commit that empties the frontier
    /// completes on the same call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is idle or paused
    /// - An internal invariant is violated (a defect, not a runtime condition)
    pub fn step(&mut self) -> Result<bool> {
        match self.state {
            EngineState::Complete => return Ok(false),
            EngineState::Idle | EngineState::Paused => {
                return Err(AlgorithmError::NotRunning {
                    state: self.state.name(),
                });
            }
            EngineState::Running => {}
        }

        // Phase 1: Check whether any work is left
        let Some([row, col]) = self.candidate.filter(|_| self.remaining > 1) else {
            self.finish();
            return Ok(false);
        };

        // Phase 2: Match the neighbourhood against the exemplar
        let commit = self.choose_pixel(row, col)?;

        // Phase 3: Commit the color and shrink the hole
        self.pixels.commit(row, col, commit.pixel)?;
        if !self.mask.clear(row, col) {
            return Err(invariant_error(
                "commit pixel",
                &format!("frontier pixel [{row}, {col}] was already known"),
            ));
        }
        self.remaining -= 1;
        self.steps_taken += 1;
        self.last_commit = Some(commit);
        if let Some(capture) = self.capture.as_mut() {
            capture.record(commit);
        }

        // Phase 4: Advance the frontier
        let frontier = self
            .frontier
            .as_mut()
            .ok_or_else(|| invariant_error("advance frontier", &"running without a frontier"))?;
        frontier.after_commit(&self.mask, row, col);
        self.candidate = frontier.pick(self.selector.rng());

        if self.candidate.is_none() {
            self.finish();
            return Ok(false);
        }
        Ok(true)
    }

    /// Score the patch around `[row, col]` and pick the color to copy
    fn choose_pixel(&mut self, row: usize, col: usize) -> Result<Commit> {
        let radius = self.config.patch_radius;
        let exemplar = self
            .exemplar
            .as_ref()
            .ok_or_else(|| invariant_error("match patch", &"running without an exemplar"))?;

        let patch = Patch::extract(self.pixels.working(), &self.mask, [row, col], radius)?;
        let scores = self.config.matching.score(&patch, exemplar)?;

        let [i, j] = select_match(&scores, &mut self.selector).ok_or_else(|| {
            invariant_error("select match", &"exemplar admits no patch placement")
        })?;

        let pixel = exemplar.get(i + radius, j + radius).ok_or_else(|| {
            invariant_error(
                "select match",
                &format!("placement [{i}, {j}] centre lies outside the exemplar"),
            )
        })?;

        let origin = self.region.map_or([0, 0], |region| [region.y, region.x]);
        Ok(Commit {
            row,
            col,
            pixel,
            source: [origin[0] + i + radius, origin[1] + j + radius],
        })
    }

    fn finish(&mut self) {
        let completion = if self.remaining <= 1 {
            info!("Fill complete after {} steps", self.steps_taken);
            Completion::Exhausted
        } else {
            warn!(
                "Frontier exhausted with {} pixels unreachable within {} of the border",
                self.remaining, self.config.patch_radius
            );
            Completion::NoCandidate {
                unreachable: self.remaining,
            }
        };
        self.completion = Some(completion);
        self.candidate = None;
        self.state = EngineState::Complete;
    }

    /// Record every commit from now on for later replay
    ///
    /// Enabling before `run` captures the whole fill; each `run` or `reset`
    /// restarts the capture from the fresh working raster.
    pub fn enable_capture(&mut self) {
        if self.capture.is_none() {
            self.capture = Some(FillCapture::new(
                self.pixels.working().clone(),
                self.mask.count_unknown(),
            ));
        }
    }

    /// Commits captured so far, if capture is enabled
    pub const fn capture(&self) -> Option<&FillCapture> {
        self.capture.as_ref()
    }

    /// Suspend a running fill between steps
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not running
    pub fn pause(&mut self) -> Result<()> {
        if self.state != EngineState::Running {
            return Err(AlgorithmError::InvalidTransition {
                from: self.state.name(),
                action: "pause",
            });
        }
        self.state = EngineState::Paused;
        Ok(())
    }

    /// Continue a paused fill
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not paused
    pub fn resume(&mut self) -> Result<()> {
        if self.state != EngineState::Paused {
            return Err(AlgorithmError::InvalidTransition {
                from: self.state.name(),
                action: "resume",
            });
        }
        self.state = EngineState::Running;
        Ok(())
    }

    /// Discard all progress and start again from the last region
    ///
    /// # Errors
    ///
    /// Returns an error if `run` has never succeeded on this engine
    pub fn reset(&mut self) -> Result<()> {
        let region = self.region.ok_or(AlgorithmError::InvalidTransition {
            from: self.state.name(),
            action: "reset",
        })?;
        self.run(region)
    }

    /// Percentage of the hole filled, rounded to the nearest integer
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let filled = 1.0 - self.remaining as f64 / self.total as f64;
        (100.0 * filled).round() as u8
    }

    /// Whether the current run has finished
    pub const fn is_complete(&self) -> bool {
        matches!(self.state, EngineState::Complete)
    }

    /// How the current run finished, `None` while it is still going
    pub const fn completion(&self) -> Option<Completion> {
        self.completion
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Configuration in use
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// The fill target
    pub const fn working(&self) -> &Raster {
        self.pixels.working()
    }

    /// The untouched source raster
    pub const fn source(&self) -> &Raster {
        self.pixels.source()
    }

    /// Current hole mask
    pub const fn mask(&self) -> &MaskField {
        &self.mask
    }

    /// Exemplar region of the current run
    pub const fn region(&self) -> Option<ExemplarRegion> {
        self.region
    }

    /// Pixels that were unknown when the run started
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Pixels still unknown
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Pixels committed in the current run
    pub const fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Frontier pixel the next step will fill
    pub const fn candidate(&self) -> Option<[usize; 2]> {
        self.candidate
    }

    /// Most recent commit of the current run
    pub const fn last_commit(&self) -> Option<Commit> {
        self.last_commit
    }

    /// Number of pixels on the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.as_ref().map_or(0, FrontierTracker::len)
    }

    /// Snapshot of the frontier as an edge mask
    pub fn frontier_edge_mask(&self) -> Option<EdgeMask> {
        self.frontier.as_ref().map(FrontierTracker::edge_mask)
    }
}

fn check_dimensions(source: &Raster, mask: &MaskField) -> Result<()> {
    if source.dimensions() != mask.dimensions() {
        return Err(AlgorithmError::DimensionMismatch {
            source_dimensions: source.dimensions(),
            mask_dimensions: mask.dimensions(),
        });
    }
    Ok(())
}
