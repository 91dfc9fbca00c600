//! Conversion configuration types

use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::debayer::BayerPattern;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
}

impl FromStr for TiffCompression {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(TiffCompression::None),
            "lzw" => Ok(TiffCompression::Lzw),
            "deflate-fast" => Ok(TiffCompression::DeflateFast),
            "deflate" | "deflate-balanced" => Ok(TiffCompression::DeflateBalanced),
            "deflate-best" => Ok(TiffCompression::DeflateBest),
            other => Err(ConversionError::UnsupportedFormat(format!("compression '{other}'"))),
        }
    }
}

/// Configuration for CFA to RGB conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Bayer layout of the input mosaic
    pub pattern: BayerPattern,
    /// Number of debayer workers; `None` follows the available parallelism
    pub workers: Option<usize>,
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    /// Only applied to integer samples
    pub predictor: Option<u16>,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    /// Largest accepted mosaic width or height when validating
    pub max_dimension: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pattern: BayerPattern::Rggb,
            workers: None,
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            max_dimension: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    pattern: Option<BayerPattern>,
    workers: Option<Option<usize>>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ConversionConfigBuilder {
    pub fn pattern(mut self, pattern: BayerPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn workers(mut self, workers: Option<usize>) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }
    
    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }
    
    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }
    
    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            pattern: self.pattern.unwrap_or(default.pattern),
            workers: self.workers.unwrap_or(default.workers),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ConversionConfig::builder()
            .pattern(BayerPattern::Grbg)
            .workers(Some(3))
            .compression(TiffCompression::Lzw)
            .predictor(Some(2))
            .validate_dimensions(false)
            .max_dimension(Some(10000))
            .build();

        assert_eq!(config.pattern, BayerPattern::Grbg);
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.compression, TiffCompression::Lzw);
        assert_eq!(config.predictor, Some(2));
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, Some(10000));
    }

    #[test]
    fn builder_keeps_defaults() {
        let config = ConversionConfig::builder().build();
        assert_eq!(config.pattern, BayerPattern::Rggb);
        assert_eq!(config.workers, None);
        assert!(config.validate_dimensions);
    }

    #[test]
    fn compression_names() {
        assert_eq!("LZW".parse::<TiffCompression>().unwrap(), TiffCompression::Lzw);
        assert_eq!("deflate".parse::<TiffCompression>().unwrap(), TiffCompression::DeflateBalanced);
        assert_eq!("deflate-best".parse::<TiffCompression>().unwrap(), TiffCompression::DeflateBest);
        assert!("zstd".parse::<TiffCompression>().is_err());
    }
}
