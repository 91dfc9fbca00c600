use std::io::{Cursor, Write};

use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tiff::tags::{Predictor, Tag};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::mosaic::{Image, ImageVariant};
use crate::image_pipeline::provenance::{Provenance, TOOL_NAME, TOOL_VERSION};
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::RgbWriter;

/// Writes interleaved RGB TIFFs in the sample kind of the image
/// (RGB8, RGB16, RGB32, RGB32Float or RGB64Float).
pub struct StandardTiffWriter;

fn encode_error(e: tiff::TiffError) -> ConversionError {
    ConversionError::EncodeError(e.to_string())
}

fn write_image<C>(
    encoder: &mut TiffEncoder<Cursor<&mut Vec<u8>>>,
    image: &Image<C::Inner>,
    description: &str,
) -> Result<()>
where
    C: ColorType,
    [C::Inner]: TiffValue,
{
    let mut tiff_image = encoder
        .new_image::<C>(image.width() as u32, image.height() as u32)
        .map_err(encode_error)?;

    let software = format!("{TOOL_NAME} {TOOL_VERSION}");
    tiff_image
        .encoder()
        .write_tag(Tag::Software, software.as_str())
        .map_err(encode_error)?;
    if !description.is_empty() {
        tiff_image
            .encoder()
            .write_tag(Tag::ImageDescription, description)
            .map_err(encode_error)?;
    }

    tiff_image.write_data(image.data()).map_err(encode_error)
}

impl RgbWriter for StandardTiffWriter {
    fn write_rgb(
        &self,
        image: &ImageVariant,
        provenance: &Provenance,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!(
            "Encoding RGB TIFF image: {}x{} ({})",
            image.width(),
            image.height(),
            image.sample_kind()
        );

        if image.channels() != 3 {
            return Err(ConversionError::InvalidChannelCount(image.channels()));
        }

        let mut buffer = Vec::new();
        
        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };
        
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(encode_error)?
            .with_compression(compression);
        
        // horizontal differencing is only defined for integer samples
        if let Some(predictor_val) = config.predictor {
            if !image.sample_kind().is_float() {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }
        }

        let description = provenance.to_text();
        match image {
            ImageVariant::UInt8(rgb) => write_image::<colortype::RGB8>(&mut encoder, rgb, &description)?,
            ImageVariant::UInt16(rgb) => write_image::<colortype::RGB16>(&mut encoder, rgb, &description)?,
            ImageVariant::UInt32(rgb) => write_image::<colortype::RGB32>(&mut encoder, rgb, &description)?,
            ImageVariant::Float32(rgb) => write_image::<colortype::RGB32Float>(&mut encoder, rgb, &description)?,
            ImageVariant::Float64(rgb) => write_image::<colortype::RGB64Float>(&mut encoder, rgb, &description)?,
            ImageVariant::Complex32(_) | ImageVariant::Complex64(_) => {
                return Err(ConversionError::ComplexSample);
            }
        }
        drop(encoder);
        
        output.write_all(&buffer)?;
        
        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::decoder::{Decoder, DecodingResult};

    fn rgb16(width: usize, height: usize) -> ImageVariant {
        let data = (0..width * height * 3).map(|i| (i * 100) as u16).collect();
        ImageVariant::UInt16(Image::from_vec(width, height, 3, data).unwrap())
    }

    #[test]
    fn writes_rgb_with_provenance() {
        let mut provenance = Provenance::new();
        provenance.record_conversion(crate::image_pipeline::debayer::BayerPattern::Grbg);

        let config = ConversionConfig::builder()
            .compression(TiffCompression::Lzw)
            .predictor(Some(2))
            .build();
        let mut output = Vec::new();
        StandardTiffWriter
            .write_rgb(&rgb16(3, 2), &provenance, &mut output, &config)
            .unwrap();

        let mut decoder = Decoder::new(Cursor::new(output)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (3, 2));
        assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGB(16));
        let description = decoder.get_tag_ascii_string(Tag::ImageDescription).unwrap();
        assert!(description.ends_with("CFA2RGB.pattern: GRBG"));
        match decoder.read_image().unwrap() {
            DecodingResult::U16(data) => assert_eq!(data[5], 500),
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn writes_float_rgb() {
        let image = ImageVariant::Float32(Image::from_vec(1, 1, 3, vec![0.25f32, 0.5, 0.75]).unwrap());
        let mut output = Vec::new();
        StandardTiffWriter
            .write_rgb(&image, &Provenance::new(), &mut output, &ConversionConfig::default())
            .unwrap();

        let mut decoder = Decoder::new(Cursor::new(output)).unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::F32(data) => assert_eq!(data, vec![0.25, 0.5, 0.75]),
            _ => panic!("expected float samples"),
        }
    }

    #[test]
    fn rejects_single_plane_image() {
        let image = ImageVariant::UInt8(Image::from_vec(2, 2, 1, vec![0u8; 4]).unwrap());
        let mut output = Vec::new();
        let result = StandardTiffWriter.write_rgb(&image, &Provenance::new(), &mut output, &ConversionConfig::default());
        assert!(matches!(result, Err(ConversionError::InvalidChannelCount(1))));
        assert!(output.is_empty());
    }
}
