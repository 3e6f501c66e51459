#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image processing module.
pub mod error;

/// image filtering module.
pub mod filter;

/// operations to round and clip images into the 8-bit range.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;

pub use crate::error::FilterError;
