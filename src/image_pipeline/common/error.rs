use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),
    
    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),
    
    #[error("Failed to decode mosaic image: {0}")]
    DecodeError(String),
    
    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),
    
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Pixel buffer holds {got} samples, expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },

    #[error("Unsupported number of channels: {0} (expected 1 or 3)")]
    InvalidChannelCount(usize),
    
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("CFA2RGB cannot be executed on complex images")]
    ComplexSample,

    #[error("Cannot process a {width}x{height} mosaic: no complete 2x2 Bayer cell")]
    DegenerateDimensions { width: usize, height: usize },

    #[error("Invalid Bayer pattern: {0}")]
    InvalidPattern(String),

    #[error("Operation aborted")]
    Aborted,
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
