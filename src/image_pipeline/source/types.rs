//! Decoded mosaic types

use crate::image_pipeline::debayer::BayerPattern;
use crate::image_pipeline::mosaic::ImageVariant;

/// A decoded mosaic and what the file said about it
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Pixel data, one plane (CFA) or three planes (colorized placeholder)
    pub image: ImageVariant,
    /// Free-text header carried over into the output provenance
    pub description: Option<String>,
    /// CFA layout reported by the file, when it is one of the four Bayer patterns
    pub pattern_hint: Option<BayerPattern>,
}

impl SourceImage {
    pub fn new(image: ImageVariant) -> Self {
        Self {
            image,
            description: None,
            pattern_hint: None,
        }
    }
}
