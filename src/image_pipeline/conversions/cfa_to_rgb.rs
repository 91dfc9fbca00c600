use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::timing::{PipelineTimings, Timer},
    debayer::{self, ProgressMonitor, SuperPixelDebayer},
    mosaic::ImageVariant,
    provenance::Provenance,
    source::{AutoMosaicReader, MosaicReader},
    tiff::{ConversionConfig, RgbWriter, StandardTiffWriter},
};

/// Decode -> check -> super-pixel debayer -> annotate -> encode.
///
/// Every conversion tracks progress and abort on its own [`ProgressMonitor`];
/// runs sharing one pipeline never see each other's counters or aborts.
pub struct CfaToRgbPipeline<R: MosaicReader, W: RgbWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
    current: Mutex<Arc<ProgressMonitor>>,
}

impl CfaToRgbPipeline<AutoMosaicReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_custom(AutoMosaicReader, StandardTiffWriter, config)
    }
}

impl<R: MosaicReader, W: RgbWriter> CfaToRgbPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
            current: Mutex::new(Arc::new(ProgressMonitor::new())),
        }
    }

    /// Whether `image` can be converted at all (it must not be complex).
    pub fn can_execute_on(&self, image: &ImageVariant) -> Result<()> {
        debayer::can_execute_on(image)
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        self.convert_with_monitor(input_data, output, Arc::new(ProgressMonitor::new()))
    }

    /// Runs one conversion against a caller-supplied `monitor`, which can be
    /// aborted before the run starts. It becomes the pipeline's current
    /// monitor until the next run begins.
    #[instrument(skip(self, input_data, output, monitor), fields(input_size = input_data.len()))]
    pub fn convert_with_monitor(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        monitor: Arc<ProgressMonitor>,
    ) -> Result<PipelineTimings> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&monitor);

        let mut timings = PipelineTimings::new();
        info!("Starting CFA to RGB conversion");

        let timer = Timer::start("decode_mosaic");
        let source = self.reader.read_mosaic(input_data)?;
        timings.record(timer);

        let timer = Timer::start("validate_dimensions");
        self.can_execute_on(&source.image)?;
        self.validate_dimensions(source.image.width(), source.image.height())?;
        timings.record(timer);

        if let Some(hint) = source.pattern_hint {
            if hint != self.config.pattern {
                warn!(
                    "File reports a {} CFA but {} was selected",
                    hint, self.config.pattern
                );
            }
        }

        let timer = Timer::start("debayer");
        let rgb = SuperPixelDebayer::new(self.config.pattern)
            .with_workers(self.config.workers)
            .process(&source.image, &monitor)?;
        timings.record(timer);

        let mut provenance = source
            .description
            .as_deref()
            .map(Provenance::from_description)
            .unwrap_or_default();
        provenance.record_conversion(self.config.pattern);

        let timer = Timer::start("encode_tiff");
        self.writer.write_rgb(&rgb, &provenance, output, &self.config)?;
        timings.record(timer);

        info!(
            "Conversion complete: {}x{} -> {}x{} in {:.3}ms",
            source.image.width(),
            source.image.height(),
            rgb.width(),
            rgb.height(),
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        self.convert_file_with_timings(input_path, output_path).map(|_| ())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let timer = Timer::start("read_input_file");
        let input_data = std::fs::read(input_path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;
        timings.record(timer);

        // the output file is only created once the conversion succeeded
        let mut encoded = Vec::new();
        let conversion_timings = self.convert_with_timings(&input_data, &mut encoded)?;
        for step in conversion_timings.steps() {
            timings.add_step(step.name.clone(), step.duration);
        }

        let timer = Timer::start("write_output_file");
        std::fs::write(output_path, &encoded).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        timings.record(timer);

        Ok(timings)
    }

    /// Monitor of the most recently started conversion; also the handle for
    /// aborting it. Aborting it after that run finished has no effect on
    /// later runs.
    pub fn monitor(&self) -> Arc<ProgressMonitor> {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
