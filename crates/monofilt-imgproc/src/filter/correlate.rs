use monofilt_image::Image;

use super::kernels::Kernel;
use crate::error::FilterError;
use crate::parallel::{self, ExecutionStrategy};

/// Correlate an image with a kernel.
///
/// Equivalent to [`correlate_with`] using the default [`ExecutionStrategy`].
///
/// # Example
///
/// ```
/// use monofilt_image::Image;
/// use monofilt_imgproc::filter::{correlate, kernels};
///
/// let image = Image::new([3, 1].into(), vec![0u8, 90, 180]).unwrap();
/// let blurred = correlate(&image, &kernels::box_blur_kernel(3).unwrap()).unwrap();
///
/// let center = *blurred.get(1, 0).unwrap();
/// assert!((center - 90.0).abs() < 1e-9);
/// ```
pub fn correlate<T>(src: &Image<T>, kernel: &Kernel) -> Result<Image<f64>, FilterError>
where
    T: Copy + Into<f64> + Sync,
{
    correlate_with(src, kernel, ExecutionStrategy::default())
}

/// Correlate an image with a kernel using the given execution strategy.
///
/// The value at `(x, y)` of the output is the sum of `kernel[ky][kx] *
/// src(x + kx - k/2, y + ky - k/2)` over the whole kernel window. Samples
/// outside the image are read with edge extension. The kernel is not flipped.
///
/// The output is neither rounded nor clipped: values may be fractional,
/// negative or above 255. Use [`crate::normalize::round_and_clip`] to bring
/// them back into the 8-bit range.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel` - The square kernel.
/// * `strategy` - How the output rows are distributed across threads.
///
/// # Returns
///
/// A new image with the same size as `src`.
pub fn correlate_with<T>(
    src: &Image<T>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Image<f64>, FilterError>
where
    T: Copy + Into<f64> + Sync,
{
    let cols = src.cols();
    let size = kernel.size();
    let half = kernel.half() as isize;
    let weights = kernel.as_slice();

    log::debug!(
        "correlating {} with a {}x{} kernel summing to {} ({:?})",
        src.size(),
        size,
        size,
        kernel.sum(),
        strategy
    );

    let mut dst = Image::from_size_val(src.size(), 0.0f64)?;

    parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, dst_row| {
        let y = r as isize;
        for (c, out) in dst_row.iter_mut().enumerate() {
            let x = c as isize;
            let mut acc = 0.0f64;
            for (ky, kernel_row) in weights.chunks_exact(size).enumerate() {
                let sy = y + ky as isize - half;
                for (kx, &k) in kernel_row.iter().enumerate() {
                    let sx = x + kx as isize - half;
                    acc += src.get_pixel(sx, sy).into() * k;
                }
            }
            *out = acc;
        }
    })?;

    Ok(dst)
}
