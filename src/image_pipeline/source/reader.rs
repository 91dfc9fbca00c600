use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::source::types::SourceImage;

pub trait MosaicReader {
    fn read_mosaic(&self, data: &[u8]) -> Result<SourceImage>;
}
