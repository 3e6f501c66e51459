use std::str::FromStr;

use monofilt_image::Image;

use super::{correlate, kernels};
use crate::error::FilterError;
use crate::normalize::{into_u8, round_half_even};

/// Invert the intensities of an image, `c -> 255 - c`.
///
/// # Arguments
///
/// * `src` - The source image.
///
/// # Returns
///
/// A new image; `src` is left untouched.
pub fn invert(src: &Image<u8>) -> Image<u8> {
    src.map(|&c| 255 - c)
}

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel_size` - The side length of the box, odd.
///
/// # Returns
///
/// A new rounded and clipped image with the same size as `src`.
pub fn blur(src: &Image<u8>, kernel_size: usize) -> Result<Image<u8>, FilterError> {
    let kernel = kernels::box_blur_kernel(kernel_size)?;
    into_u8(correlate(src, &kernel)?)
}

/// Sharpen an image with an unsharp mask.
///
/// Every output sample is `2 * src - blurred`, where `blurred` is the
/// unrounded box blur of `src` with the given kernel size.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel_size` - The side length of the blur box, odd.
///
/// # Returns
///
/// A new rounded and clipped image with the same size as `src`.
pub fn sharpen(src: &Image<u8>, kernel_size: usize) -> Result<Image<u8>, FilterError> {
    let kernel = kernels::box_blur_kernel(kernel_size)?;
    let mut sharpened = correlate(src, &kernel)?;

    sharpened
        .as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(dst, &s)| {
            *dst = 2.0 * s as f64 - *dst;
        });

    into_u8(sharpened)
}

/// Compute the sobel gradient magnitude of an image.
///
/// The horizontal and vertical responses `gx` and `gy` are obtained by
/// correlating with [`kernels::sobel_kernel_x`] and [`kernels::sobel_kernel_y`];
/// each output sample is `round(sqrt(gx² + gy²))`, clipped to 255.
///
/// # Arguments
///
/// * `src` - The source image.
pub fn edges(src: &Image<u8>) -> Result<Image<u8>, FilterError> {
    let mut magnitude = correlate(src, &kernels::sobel_kernel_x())?;
    let gy = correlate(src, &kernels::sobel_kernel_y())?;

    // compute the magnitude in place of gx
    magnitude
        .as_slice_mut()
        .iter_mut()
        .zip(gy.as_slice().iter())
        .for_each(|(dst, &gy)| {
            let gx = *dst;
            *dst = round_half_even((gx * gx + gy * gy).sqrt());
        });

    into_u8(magnitude)
}

/// One of the supported greyscale filters with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// [`invert`]
    Invert,
    /// [`blur`] with the given box size.
    Blur(usize),
    /// [`sharpen`] with the given box size.
    Sharpen(usize),
    /// [`edges`]
    Edges,
}

impl Filter {
    /// Apply the filter to `src`, producing a new image.
    pub fn apply(&self, src: &Image<u8>) -> Result<Image<u8>, FilterError> {
        match *self {
            Filter::Invert => Ok(invert(src)),
            Filter::Blur(n) => blur(src, n),
            Filter::Sharpen(n) => sharpen(src, n),
            Filter::Edges => edges(src),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Filter::Invert => write!(f, "invert"),
            Filter::Blur(n) => write!(f, "blur:{n}"),
            Filter::Sharpen(n) => write!(f, "sharpen:{n}"),
            Filter::Edges => write!(f, "edges"),
        }
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    /// Parse `invert`, `edges`, `blur:<n>` or `sharpen:<n>`.
    ///
    /// ```
    /// use monofilt_imgproc::filter::Filter;
    ///
    /// assert_eq!("blur:5".parse::<Filter>().unwrap(), Filter::Blur(5));
    /// assert_eq!("Edges".parse::<Filter>().unwrap(), Filter::Edges);
    /// assert!("blur".parse::<Filter>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };

        let size = |arg: Option<&str>| -> Result<usize, FilterError> {
            let arg = arg.ok_or_else(|| FilterError::InvalidFilter(format!("{s}: missing size")))?;
            let n = arg
                .parse::<usize>()
                .map_err(|e| FilterError::InvalidFilter(format!("{s}: {e}")))?;
            if n % 2 == 0 {
                return Err(FilterError::EvenKernelSize(n));
            }
            if n > kernels::MAX_KERNEL_SIZE {
                return Err(FilterError::KernelTooLarge(n));
            }
            Ok(n)
        };

        match (name, arg) {
            ("invert", None) => Ok(Filter::Invert),
            ("edges", None) => Ok(Filter::Edges),
            ("blur", arg) => Ok(Filter::Blur(size(arg)?)),
            ("sharpen", arg) => Ok(Filter::Sharpen(size(arg)?)),
            _ => Err(FilterError::InvalidFilter(s.to_string())),
        }
    }
}
