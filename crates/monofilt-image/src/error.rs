/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the image has no pixels along one of its axes.
    #[error("Image size must be positive, got {0}x{1}")]
    ZeroSize(usize, usize),

    /// Error when a write targets a pixel outside the image.
    #[error("Pixel index ({0}, {1}) out of bounds for {2}x{3} image")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
