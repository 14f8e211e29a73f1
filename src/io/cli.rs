//! Command-line interface for batch hole filling of PNG files

use crate::algorithm::driver::BatchDriver;
use crate::algorithm::engine::{SynthesisConfig, SynthesisEngine};
use crate::algorithm::frontier::FrontierStrategy;
use crate::algorithm::matching::MatchStrategy;
use crate::io::configuration::{
    DEFAULT_PATCH_RADIUS, DEFAULT_SEED, DEFAULT_STEPS_PER_BATCH, GIF_FRAME_DELAY_MS, MASK_SUFFIX,
    OUTPUT_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, target_error};
use crate::io::image::{export_raster_as_png, load_mask, load_raster};
use crate::io::progress::ProgressManager;
use crate::spatial::ExemplarRegion;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "texfill")]
#[command(
    author,
    version,
    about = "Fill image holes by sampling texture from an exemplar region"
)]
/// Command-line arguments for the hole filling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Exemplar rectangle as X,Y,WIDTH,HEIGHT in source pixels
    #[arg(short = 'g', long, value_name = "X,Y,W,H")]
    pub region: ExemplarRegion,

    /// Hole mask image (defaults to <input>_mask.png); non-zero red marks the hole
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Patch radius; the compared square is 2R+1 pixels wide
    #[arg(short, long, default_value_t = DEFAULT_PATCH_RADIUS)]
    pub radius: usize,

    /// Pixels synthesized per progress update (clamped to 1..=50)
    #[arg(short, long, default_value_t = DEFAULT_STEPS_PER_BATCH)]
    pub batch: usize,

    /// Random seed for reproducible fills
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Score placements on one thread and rescan the frontier every step
    #[arg(long)]
    pub sequential: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration selected by the flags
    pub const fn synthesis_config(&self) -> SynthesisConfig {
        let (frontier, matching) = if self.sequential {
            (FrontierStrategy::FullScan, MatchStrategy::Sequential)
        } else {
            (FrontierStrategy::Incremental, MatchStrategy::Parallel)
        };

        SynthesisConfig {
            patch_radius: self.radius,
            steps_per_batch: self.batch,
            seed: self.seed,
            frontier,
            matching,
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            info!("Nothing to fill under {}", self.cli.target.display());
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Resolve the target into the list of images to fill
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a readable
    /// directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if !is_png(&self.cli.target) {
                return Err(target_error(
                    self.cli.target.clone(),
                    "Target file must be a PNG image",
                ));
            }
            if self.should_process_file(&self.cli.target) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) && !is_derived_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(target_error(
                self.cli.target.clone(),
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let mask_path = self
            .cli
            .mask
            .clone()
            .unwrap_or_else(|| Self::mask_path(input_path));
        let source = load_raster(input_path)?;
        let hole = load_mask(&mask_path)?;

        let config = self.cli.synthesis_config();
        let mut engine = SynthesisEngine::new(source, hole, config)?;
        if self.cli.visualize {
            engine.enable_capture();
        }
        engine.run(self.cli.region)?;

        let driver = BatchDriver::from_config(&config);
        let progress_manager = &self.progress_manager;
        driver.run_to_completion(&mut engine, |filling, _| {
            if let Some(pm) = progress_manager {
                pm.update_progress(index, filling.progress());
            }
        })?;

        export_raster_as_png(engine.working(), &Self::output_path(input_path))?;

        if let Some(capture) = engine.capture() {
            capture.export_gif(&Self::visualization_path(input_path), GIF_FRAME_DELAY_MS)?;
        }

        info!(
            "Filled {} of {} pixels in {} in {:.2?}",
            engine.steps_taken(),
            engine.total(),
            input_path.display(),
            start_time.elapsed()
        );

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }

    /// Default hole mask location for an input image
    pub fn mask_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, MASK_SUFFIX, "png")
    }

    /// Filled image location for an input image
    pub fn output_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Fill animation location for an input image
    pub fn visualization_path(input_path: &Path) -> PathBuf {
        sibling_with_suffix(input_path, VISUALIZATION_SUFFIX, "gif")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

/// Masks and previous outputs sit next to their inputs and are not inputs themselves
fn is_derived_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(MASK_SUFFIX) || stem.ends_with(OUTPUT_SUFFIX))
}

fn sibling_with_suffix(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
