use crate::error::FilterError;

/// Largest side length accepted by the kernel builders.
pub const MAX_KERNEL_SIZE: usize = 1023;

/// A square correlation kernel with an odd side length.
///
/// The weights are stored in row-major order and the anchor sits at the
/// center, `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from a flat list of `k * k` weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::KernelNotSquare`] if the length is zero or not a
    /// perfect square and [`FilterError::EvenKernelSize`] if the side is even.
    ///
    /// # Example
    ///
    /// ```
    /// use monofilt_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(kernel.size(), 3);
    /// assert_eq!(kernel.at(1, 1), 1.0);
    ///
    /// assert!(Kernel::new(vec![1.0; 8]).is_err());
    /// assert!(Kernel::new(vec![1.0; 4]).is_err());
    /// ```
    pub fn new(data: Vec<f64>) -> Result<Self, FilterError> {
        let len = data.len();
        let size = (len as f64).sqrt().round() as usize;
        if len == 0 || size * size != len {
            return Err(FilterError::KernelNotSquare(len));
        }
        if size % 2 == 0 {
            return Err(FilterError::EvenKernelSize(size));
        }
        Ok(Self { size, data })
    }

    /// Side length of the kernel.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the anchor to the kernel border.
    #[inline]
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// The weights in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Weight at column `kx`, row `ky` of the kernel window.
    ///
    /// # Panics
    ///
    /// If `kx` or `ky` is outside the kernel.
    #[inline]
    pub fn at(&self, kx: usize, ky: usize) -> f64 {
        self.data[ky * self.size + kx]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

// number of weights of a `kernel_size` square kernel
fn kernel_len(kernel_size: usize) -> Result<usize, FilterError> {
    if kernel_size > MAX_KERNEL_SIZE {
        return Err(FilterError::KernelTooLarge(kernel_size));
    }
    kernel_size
        .checked_mul(kernel_size)
        .ok_or(FilterError::KernelTooLarge(kernel_size))
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The side length of the kernel, odd.
///
/// # Returns
///
/// A kernel of `kernel_size * kernel_size` weights all equal to `1 / kernel_size²`.
///
/// # Errors
///
/// Returns [`FilterError::EvenKernelSize`] for an even size and
/// [`FilterError::KernelTooLarge`] above [`MAX_KERNEL_SIZE`].
pub fn box_blur_kernel(kernel_size: usize) -> Result<Kernel, FilterError> {
    let n = kernel_len(kernel_size)?;
    Kernel::new(vec![1.0 / n as f64; n])
}

/// Create an identity kernel: all zero except a one at the anchor.
pub fn identity_kernel(kernel_size: usize) -> Result<Kernel, FilterError> {
    let n = kernel_len(kernel_size)?;
    let mut data = vec![0.0; n];
    if let Some(center) = data.get_mut(n / 2) {
        *center = 1.0;
    }
    Kernel::new(data)
}

/// The sobel 3x3 kernel responding to horizontal intensity changes.
pub fn sobel_kernel_x() -> Kernel {
    Kernel {
        size: 3,
        data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
    }
}

/// The sobel 3x3 kernel responding to vertical intensity changes.
pub fn sobel_kernel_y() -> Kernel {
    Kernel {
        size: 3,
        data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
    }
}
