//! Rounding and clipping of intermediate images back into the 8-bit range.
//!
//! The correlation primitive produces unbounded `f64` images. Before an image
//! can be displayed or encoded, every sample has to be an integer in
//! `[0, 255]`. [`round_and_clip`] performs that finalization in place and
//! [`into_u8`] additionally narrows the storage type.
//!
//! # Rounding rule
//!
//! Ties are rounded to the nearest even integer (`0.5 -> 0`, `1.5 -> 2`,
//! `2.5 -> 2`). The same rule is used by every filter in this crate.

use monofilt_image::Image;

use crate::error::FilterError;

/// Lowest displayable intensity.
pub const MIN_INTENSITY: f64 = 0.0;

/// Highest displayable intensity.
pub const MAX_INTENSITY: f64 = 255.0;

/// Round `x` to the nearest integer, ties to even.
///
/// # Example
///
/// ```
/// use monofilt_imgproc::normalize::round_half_even;
///
/// assert_eq!(round_half_even(0.5), 0.0);
/// assert_eq!(round_half_even(1.5), 2.0);
/// assert_eq!(round_half_even(2.5), 2.0);
/// assert_eq!(round_half_even(2.6), 3.0);
/// ```
#[inline]
pub fn round_half_even(x: f64) -> f64 {
    x.round_ties_even()
}

/// Clip a single sample into `[0, 255]` and round it.
#[inline]
pub fn clip_and_round(x: f64) -> f64 {
    if x < MIN_INTENSITY {
        MIN_INTENSITY
    } else if x > MAX_INTENSITY {
        MAX_INTENSITY
    } else {
        round_half_even(x)
    }
}

/// Clip every sample of `image` into `[0, 255]` and round it to an integer, in place.
///
/// Only meant for images freshly produced by a filter; callers' images are
/// never passed here.
///
/// # Example
///
/// ```
/// use monofilt_image::Image;
/// use monofilt_imgproc::normalize::round_and_clip;
///
/// let mut image = Image::new([4, 1].into(), vec![-3.2, 12.5, 99.7, 300.0]).unwrap();
/// round_and_clip(&mut image);
///
/// assert_eq!(image.as_slice(), &[0.0, 12.0, 100.0, 255.0]);
/// ```
pub fn round_and_clip(image: &mut Image<f64>) {
    image
        .as_slice_mut()
        .iter_mut()
        .for_each(|v| *v = clip_and_round(*v));
}

/// Finalize an intermediate image and narrow it to 8 bits.
///
/// # Errors
///
/// Returns an error if a sample is not a number and therefore cannot be
/// represented as an intensity.
pub fn into_u8(mut image: Image<f64>) -> Result<Image<u8>, FilterError> {
    round_and_clip(&mut image);
    Ok(image.cast::<u8>()?)
}
