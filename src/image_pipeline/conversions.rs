//! Pipeline conversions module
//!
//! This module contains orchestration logic for CFA to RGB conversion.

mod cfa_to_rgb;
mod timing;


pub use cfa_to_rgb::CfaToRgbPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
