//! Mosaic reader for camera RAW files using the rawloader library.
//!
//! Supports any format rawloader can decode (ARW, CR2, NEF, DNG, RAF, ...).
//! Only single-component sensor data is accepted.

use std::io::Cursor;

use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::BayerPattern;
use crate::image_pipeline::mosaic::{Image, ImageVariant};
use crate::image_pipeline::source::reader::MosaicReader;
use crate::image_pipeline::source::types::SourceImage;

/// RAW mosaic reader backed by rawloader.
///
/// Integer sensor data becomes a 16-bit mosaic, float data a 32-bit float
/// mosaic. The camera's CFA name is reported as `pattern_hint` when it is one
/// of the four Bayer layouts.
pub struct RawLoaderReader;

impl MosaicReader for RawLoaderReader {
    fn read_mosaic(&self, data: &[u8]) -> Result<SourceImage> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;

        if decoded.cpp != 1 {
            return Err(ConversionError::UnsupportedFormat(format!(
                "RAW with {} components per pixel",
                decoded.cpp
            )));
        }

        let image = match decoded.data {
            RawloaderImageData::Integer(values) => {
                ImageVariant::UInt16(Image::from_vec(width, height, 1, values)?)
            }
            RawloaderImageData::Float(values) => {
                ImageVariant::Float32(Image::from_vec(width, height, 1, values)?)
            }
        };

        let pattern_hint = decoded.cfa.name.parse::<BayerPattern>().ok();
        debug!(
            "Decoded RAW image: {}x{} from {} {}, CFA {}",
            width, height, decoded.clean_make, decoded.clean_model, decoded.cfa.name
        );

        Ok(SourceImage {
            image,
            description: None,
            pattern_hint,
        })
    }
}
