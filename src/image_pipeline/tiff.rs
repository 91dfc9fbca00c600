//! TIFF writing module
//!
//! This module delivers debayered RGB images as TIFF files, with compression
//! options and the provenance records stored in the file header.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::RgbWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ConversionConfig, ConversionConfigBuilder};
