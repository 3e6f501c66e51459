use monofilt_image::ImageError;

use crate::parallel::ParallelError;

/// Errors related to filtering operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel length is zero or not a perfect square.
    #[error("kernel length {0} is not a non-zero perfect square")]
    KernelNotSquare(usize),

    /// The kernel must have an odd side length.
    #[error("kernel side length must be odd, got {0}")]
    EvenKernelSize(usize),

    /// The kernel side length exceeds [`crate::filter::kernels::MAX_KERNEL_SIZE`].
    #[error("kernel side length {0} is too large")]
    KernelTooLarge(usize),

    /// The filter description could not be parsed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the execution backend.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
