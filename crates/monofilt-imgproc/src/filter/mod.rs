//! Filter operations
//!
//! This module provides the correlation primitive and the filters built on top of it.

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// 2D correlation
mod correlate;
pub use correlate::*;

/// Filter operations
mod ops;
pub use ops::*;
