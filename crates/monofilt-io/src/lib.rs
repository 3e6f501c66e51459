#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access, encoding/decoding failures
/// and unsupported pixel layouts.
pub mod error;

/// High-level image reading and writing functions.
///
/// Decodes any format supported by the `image` crate into a single-channel
/// 8-bit image. See [`functional::read_image_gray8`].
pub mod functional;

/// PNG image encoding and decoding.
///
/// Direct 8-bit greyscale PNG codec through the `png` crate.
pub mod png;

pub use crate::error::IoError;
