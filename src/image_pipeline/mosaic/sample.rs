use crate::image_pipeline::mosaic::types::SampleKind;

/// Converts between a stored sample and the `f64` working precision.
///
/// Reading never rounds. Writing rounds integers to nearest (ties away from
/// zero) and saturates at the type bounds, so a value computed in working
/// precision is rounded exactly once.
pub trait Sample: Copy + Send + Sync + 'static {
    const KIND: SampleKind;

    fn to_working(self) -> f64;

    fn from_working(value: f64) -> Self;
}

macro_rules! integer_sample {
    ($ty:ty, $kind:expr) => {
        impl Sample for $ty {
            const KIND: SampleKind = $kind;

            #[inline]
            fn to_working(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_working(value: f64) -> Self {
                // float-to-int `as` saturates, NaN becomes 0
                value.round() as $ty
            }
        }
    };
}

integer_sample!(u8, SampleKind::UInt8);
integer_sample!(u16, SampleKind::UInt16);
integer_sample!(u32, SampleKind::UInt32);

impl Sample for f32 {
    const KIND: SampleKind = SampleKind::Float32;

    #[inline]
    fn to_working(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    const KIND: SampleKind = SampleKind::Float64;

    #[inline]
    fn to_working(self) -> f64 {
        self
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        value
    }
}
