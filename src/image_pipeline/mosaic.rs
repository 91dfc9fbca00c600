//! Pixel buffers
//!
//! Interleaved image storage shared by the mosaic input and the RGB output,
//! plus the per-sample-kind conversion to and from working precision.

mod sample;
pub mod types;

pub use sample::Sample;
pub use types::{Image, ImageVariant, SampleKind, Site};
