//! Super-pixel debayering of Bayer CFA mosaics to RGB

pub mod monitor;
pub mod partition;
pub mod pattern;
pub mod super_pixel;

#[cfg(test)]
mod tests;

use tracing::{info, instrument};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::mosaic::ImageVariant;

pub use monitor::ProgressMonitor;
pub use partition::{RowRange, partition_rows, worker_count};
pub use pattern::{BayerPattern, CellSites};
pub use super_pixel::{PROGRESS_BATCH_ROWS, super_pixel};

/// Host-side precondition: complex-sample images cannot be debayered.
pub fn can_execute_on(image: &ImageVariant) -> Result<()> {
    if image.is_complex_sample() {
        return Err(ConversionError::ComplexSample);
    }
    Ok(())
}

/// Super-pixel debayer for any real sample kind.
///
/// The output keeps the sample kind of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuperPixelDebayer {
    pattern: BayerPattern,
    workers: Option<usize>,
}

impl SuperPixelDebayer {
    pub fn new(pattern: BayerPattern) -> Self {
        Self { pattern, workers: None }
    }

    /// Fixes the number of workers instead of following the rayon pool size.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn pattern(&self) -> BayerPattern {
        self.pattern
    }

    #[instrument(skip_all, fields(pattern = %self.pattern))]
    pub fn process(&self, source: &ImageVariant, monitor: &ProgressMonitor) -> Result<ImageVariant> {
        can_execute_on(source)?;

        info!(
            "Starting super-pixel debayering for {} image {}x{} ({} plane(s))",
            source.sample_kind(),
            source.width(),
            source.height(),
            source.channels()
        );

        let (pattern, workers) = (self.pattern, self.workers);
        let rgb = match source {
            ImageVariant::UInt8(image) => ImageVariant::UInt8(super_pixel(image, pattern, workers, monitor)?),
            ImageVariant::UInt16(image) => ImageVariant::UInt16(super_pixel(image, pattern, workers, monitor)?),
            ImageVariant::UInt32(image) => ImageVariant::UInt32(super_pixel(image, pattern, workers, monitor)?),
            ImageVariant::Float32(image) => ImageVariant::Float32(super_pixel(image, pattern, workers, monitor)?),
            ImageVariant::Float64(image) => ImageVariant::Float64(super_pixel(image, pattern, workers, monitor)?),
            ImageVariant::Complex32(_) | ImageVariant::Complex64(_) => {
                return Err(ConversionError::ComplexSample);
            }
        };

        info!("Debayered to {}x{} RGB", rgb.width(), rgb.height());
        Ok(rgb)
    }
}
