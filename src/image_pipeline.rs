//! Image processing pipeline module
//!
//! This module provides a structured approach to CFA to RGB conversion,
//! with separate modules for mosaic reading, super-pixel debayering, TIFF
//! writing, and conversion orchestration.

pub mod common;
pub mod mosaic;
pub mod debayer;
pub mod source;
pub mod tiff;
pub mod provenance;
pub mod conversions;

pub use self::common::{
    ConversionError,
    Result,
};

pub use self::mosaic::{
    Image,
    ImageVariant,
    Sample,
    SampleKind,
    Site,
};

pub use self::debayer::{
    BayerPattern,
    CellSites,
    ProgressMonitor,
    RowRange,
    SuperPixelDebayer,
    can_execute_on,
    super_pixel,
};

pub use self::source::{
    AutoMosaicReader,
    MosaicReader,
    RawLoaderReader,
    SourceImage,
    TiffMosaicReader,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    RgbWriter,
    StandardTiffWriter,
};

pub use self::provenance::{
    HeaderKeyword,
    Provenance,
};

pub use self::conversions::{
    CfaToRgbPipeline,
    PipelineTimings,
};
