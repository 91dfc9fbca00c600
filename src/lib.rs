//! Super-pixel demosaicing of Bayer CFA images.
//!
//! Every 2x2 Bayer cell of the mosaic collapses into one RGB pixel, halving
//! both image dimensions. The two green samples of a cell are averaged.

pub mod image_pipeline;
pub mod logger;
