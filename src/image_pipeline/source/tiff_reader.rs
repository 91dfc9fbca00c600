//! Mosaic reader for plain TIFF files.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::mosaic::{Image, ImageVariant};
use crate::image_pipeline::source::reader::MosaicReader;
use crate::image_pipeline::source::types::SourceImage;

/// Reads grayscale (CFA) or RGB TIFFs with 8/16/32-bit integer or 32/64-bit
/// float samples. The `ImageDescription` tag, if any, becomes the source
/// description.
pub struct TiffMosaicReader;

fn decode_error(e: tiff::TiffError) -> ConversionError {
    ConversionError::DecodeError(e.to_string())
}

impl MosaicReader for TiffMosaicReader {
    fn read_mosaic(&self, data: &[u8]) -> Result<SourceImage> {
        debug!("Decoding TIFF mosaic, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_error)?;
        let (width, height) = decoder.dimensions().map_err(decode_error)?;
        let (width, height) = (width as usize, height as usize);

        let channels = match decoder.colortype().map_err(decode_error)? {
            ColorType::Gray(_) => 1,
            ColorType::RGB(_) => 3,
            other => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "TIFF color type {other:?}"
                )));
            }
        };

        let description = decoder.get_tag_ascii_string(Tag::ImageDescription).ok();

        let image = match decoder.read_image().map_err(decode_error)? {
            DecodingResult::U8(v) => ImageVariant::UInt8(Image::from_vec(width, height, channels, v)?),
            DecodingResult::U16(v) => ImageVariant::UInt16(Image::from_vec(width, height, channels, v)?),
            DecodingResult::U32(v) => ImageVariant::UInt32(Image::from_vec(width, height, channels, v)?),
            DecodingResult::F32(v) => ImageVariant::Float32(Image::from_vec(width, height, channels, v)?),
            DecodingResult::F64(v) => ImageVariant::Float64(Image::from_vec(width, height, channels, v)?),
            _ => {
                return Err(ConversionError::UnsupportedFormat(
                    "TIFF sample format (signed or 64-bit integer)".to_string(),
                ));
            }
        };

        debug!(
            "Decoded TIFF mosaic: {}x{}, {} plane(s), {}",
            width,
            height,
            channels,
            image.sample_kind()
        );

        Ok(SourceImage {
            image,
            description,
            pattern_hint: None,
        })
    }
}
