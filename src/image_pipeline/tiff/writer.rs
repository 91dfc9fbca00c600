use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::mosaic::ImageVariant;
use crate::image_pipeline::provenance::Provenance;
use crate::image_pipeline::tiff::types::ConversionConfig;

pub trait RgbWriter {
    fn write_rgb(
        &self,
        image: &ImageVariant,
        provenance: &Provenance,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
