use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::source::rawloader_reader::RawLoaderReader;
use crate::image_pipeline::source::reader::MosaicReader;
use crate::image_pipeline::source::tiff_reader::TiffMosaicReader;
use crate::image_pipeline::source::types::SourceImage;

/// Tries camera RAW decoding first, then plain TIFF.
///
/// Most RAW formats are TIFF containers, so the RAW decoder has to go first.
#[derive(Default)]
pub struct AutoMosaicReader;

impl MosaicReader for AutoMosaicReader {
    fn read_mosaic(&self, data: &[u8]) -> Result<SourceImage> {
        match RawLoaderReader.read_mosaic(data) {
            Ok(source) => Ok(source),
            Err(raw_error) => {
                debug!("Not a camera RAW ({}), trying TIFF", raw_error);
                TiffMosaicReader.read_mosaic(data)
            }
        }
    }
}
