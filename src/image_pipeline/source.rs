//! Mosaic acquisition module
//!
//! This module turns encoded files into mosaic images ready for debayering.

mod reader;
mod rawloader_reader;
mod tiff_reader;
mod auto_reader;
pub mod types;

pub use reader::MosaicReader;
pub use rawloader_reader::RawLoaderReader;
pub use tiff_reader::TiffMosaicReader;
pub use auto_reader::AutoMosaicReader;
pub use types::SourceImage;
