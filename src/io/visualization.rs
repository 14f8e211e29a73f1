//! Commit capture and GIF generation for watching a fill progress

use crate::algorithm::engine::Commit;
use crate::io::configuration::{PIXELS_PER_FRAME, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Raster;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// Captures committed pixels for visualization
///
/// Records every commit of a run on top of the working raster as it stood
/// when the run started, so the fill can be replayed afterwards
pub struct FillCapture {
    initial: Raster,
    commits: Vec<Commit>,
}

impl FillCapture {
    /// Start a capture from the working raster before the first commit
    pub fn new(initial: Raster, expected_commits: usize) -> Self {
        Self {
            initial,
            commits: Vec::with_capacity(expected_commits),
        }
    }

    /// Drop recorded commits and start over from a new initial raster
    pub fn restart(&mut self, initial: Raster) {
        self.initial = initial;
        self.commits.clear();
    }

    /// Records a committed pixel
    pub fn record(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Returns all recorded commits in order
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Returns the total number of recorded commits
    pub const fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Number of frames an export would contain before the final hold frame
    pub fn frame_count(&self, frame_delay_ms: u32) -> usize {
        let skip_factor = Self::skip_factor(frame_delay_ms);
        let batches = self.commits.len().div_ceil(PIXELS_PER_FRAME);
        1 + batches.div_ceil(skip_factor)
    }

    /// Export the captured fill as a GIF with automatic frame skipping
    ///
    /// Every frame folds in [`PIXELS_PER_FRAME`] commits. When the requested
    /// delay is below what viewers honour, frames are skipped so the
    /// apparent speed is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let frames = self.generate_frames(effective_delay_ms, Self::skip_factor(frame_delay_ms));

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn skip_factor(frame_delay_ms: u32) -> usize {
        if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1)) as usize
        } else {
            1
        }
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut canvas = self.initial.to_rgba_image();
        let mut frames = vec![Self::frame(canvas.clone(), delay_ms)];
        let mut batch_count = 0;

        for batch in self.commits.chunks(PIXELS_PER_FRAME) {
            for commit in batch {
                if let Some(pixel) = canvas.get_pixel_mut_checked(commit.col as u32, commit.row as u32)
                {
                    *pixel = Rgba(commit.pixel);
                }
            }

            batch_count += 1;
            if batch_count % skip_factor == 0 {
                frames.push(Self::frame(canvas.clone(), delay_ms));
            }
        }

        if batch_count % skip_factor != 0 {
            frames.push(Self::frame(canvas.clone(), delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame(canvas, delay_ms * 25));
        frames
    }

    fn frame(image: RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(
            image,
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}
