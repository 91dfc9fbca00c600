//! Image buffer types

use std::fmt;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Numeric representation of one channel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    UInt8,
    UInt16,
    UInt32,
    Float32,
    Float64,
    /// Pairs of 32-bit floats (real, imaginary)
    Complex32,
    /// Pairs of 64-bit floats (real, imaginary)
    Complex64,
}

impl SampleKind {
    pub fn is_complex(self) -> bool {
        matches!(self, SampleKind::Complex32 | SampleKind::Complex64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, SampleKind::Float32 | SampleKind::Float64)
    }

    /// Bits per scalar component.
    pub fn bits_per_sample(self) -> u32 {
        match self {
            SampleKind::UInt8 => 8,
            SampleKind::UInt16 => 16,
            SampleKind::UInt32 | SampleKind::Float32 | SampleKind::Complex32 => 32,
            SampleKind::Float64 | SampleKind::Complex64 => 64,
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleKind::UInt8 => f.write_str("8-bit integer"),
            SampleKind::UInt16 => f.write_str("16-bit integer"),
            SampleKind::UInt32 => f.write_str("32-bit integer"),
            SampleKind::Float32 => f.write_str("32-bit float"),
            SampleKind::Float64 => f.write_str("64-bit float"),
            SampleKind::Complex32 => f.write_str("32-bit complex"),
            SampleKind::Complex64 => f.write_str("64-bit complex"),
        }
    }
}

/// A pixel coordinate: column `col`, row `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub col: usize,
    pub row: usize,
}

impl Site {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Row-major image with `channels` interleaved planes.
///
/// Sample `(col, row, c)` lives at `(row * width + col) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Wraps an existing buffer. `channels` must be 1 or 3 and `data` must
    /// hold exactly `width * height * channels` samples.
    pub fn from_vec(width: usize, height: usize, channels: usize, data: Vec<T>) -> Result<Self> {
        if channels != 1 && channels != 3 {
            return Err(ConversionError::InvalidChannelCount(channels));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(ConversionError::BufferSizeMismatch { expected, got: data.len() });
        }
        Ok(Self { width, height, channels, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// True when the image carries three planes.
    pub fn is_color(&self) -> bool {
        self.channels == 3
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Copy> Image<T> {
    /// Sample of plane `channel` at `site`.
    ///
    /// Panics when `site` or `channel` lies outside the image.
    #[inline]
    pub fn sample(&self, site: Site, channel: usize) -> T {
        debug_assert!(site.col < self.width && site.row < self.height && channel < self.channels);
        self.data[(site.row * self.width + site.col) * self.channels + channel]
    }
}

/// An image of any supported sample kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageVariant {
    UInt8(Image<u8>),
    UInt16(Image<u16>),
    UInt32(Image<u32>),
    Float32(Image<f32>),
    Float64(Image<f64>),
    Complex32(Image<[f32; 2]>),
    Complex64(Image<[f64; 2]>),
}

macro_rules! with_image {
    ($variant:expr, $image:ident => $body:expr) => {
        match $variant {
            ImageVariant::UInt8($image) => $body,
            ImageVariant::UInt16($image) => $body,
            ImageVariant::UInt32($image) => $body,
            ImageVariant::Float32($image) => $body,
            ImageVariant::Float64($image) => $body,
            ImageVariant::Complex32($image) => $body,
            ImageVariant::Complex64($image) => $body,
        }
    };
}

impl ImageVariant {
    pub fn sample_kind(&self) -> SampleKind {
        match self {
            ImageVariant::UInt8(_) => SampleKind::UInt8,
            ImageVariant::UInt16(_) => SampleKind::UInt16,
            ImageVariant::UInt32(_) => SampleKind::UInt32,
            ImageVariant::Float32(_) => SampleKind::Float32,
            ImageVariant::Float64(_) => SampleKind::Float64,
            ImageVariant::Complex32(_) => SampleKind::Complex32,
            ImageVariant::Complex64(_) => SampleKind::Complex64,
        }
    }

    pub fn is_complex_sample(&self) -> bool {
        self.sample_kind().is_complex()
    }

    pub fn width(&self) -> usize {
        with_image!(self, image => image.width())
    }

    pub fn height(&self) -> usize {
        with_image!(self, image => image.height())
    }

    pub fn channels(&self) -> usize {
        with_image!(self, image => image.channels())
    }
}
