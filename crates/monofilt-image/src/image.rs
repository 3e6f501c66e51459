use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use monofilt_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents a single-channel image with pixel data.
///
/// The samples are stored in row-major order, i.e. the sample at `(x, y)`
/// lives at index `y * width + x`. The length of the buffer always equals
/// `width * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image, row-major.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or the image
    /// has a zero width or height, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use monofilt_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSize(size.width, size.height));
        }

        // check if the data length matches the image size
        if data.len() != size.width * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use monofilt_image::{Image, ImageSize};
    ///
    /// let image = Image::<f64>::from_size_val([3, 2].into(), 0.5).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 6);
    /// assert_eq!(image.get(2, 1), Some(&0.5));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the pixel data as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return the pixel buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to the in-bounds pixel at `(x, y)`.
    ///
    /// Returns `None` when the coordinate lies outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.data.get(y * self.width() + x)
    }

    /// Read the pixel at `(x, y)` with edge extension.
    ///
    /// Coordinates outside the image are clamped to the nearest edge, so the
    /// image behaves as if its border rows and columns were repeated forever.
    /// This never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use monofilt_image::{Image, ImageSize};
    ///
    /// let image = Image::new([2, 2].into(), vec![1u8, 2, 3, 4]).unwrap();
    ///
    /// assert_eq!(image.get_pixel(-5, 0), 1);
    /// assert_eq!(image.get_pixel(1000, 1), 4);
    /// assert_eq!(image.get_pixel(0, -1), 1);
    /// ```
    #[inline]
    pub fn get_pixel(&self, x: isize, y: isize) -> T
    where
        T: Copy,
    {
        let x = x.clamp(0, self.width() as isize - 1) as usize;
        let y = y.clamp(0, self.height() as isize - 1) as usize;
        self.data[y * self.width() + x]
    }

    /// Write `value` at `(x, y)`.
    ///
    /// Writes are never clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the coordinate lies outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: T) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let width = self.width();
        self.data[y * width + x] = value;
        Ok(())
    }

    /// Apply `f` to every pixel and collect the results into a new image.
    ///
    /// The source image is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use monofilt_image::Image;
    ///
    /// let image = Image::new([3, 1].into(), vec![0u8, 100, 255]).unwrap();
    /// let inverted = image.map(|&c| 255 - c);
    ///
    /// assert_eq!(inverted.as_slice(), &[255, 155, 0]);
    /// ```
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Image<U> {
        Image {
            size: self.size,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CastError`] if any value cannot be represented in `U`.
    pub fn cast<U>(&self) -> Result<Image<U>, ImageError>
    where
        T: Copy + num_traits::NumCast,
        U: num_traits::NumCast,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| {
                U::from(x)
                    .ok_or_else(|| ImageError::CastError(std::any::type_name::<U>().to_string()))
            })
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }
}
