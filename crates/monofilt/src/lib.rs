#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use monofilt_image as image;

#[doc(inline)]
pub use monofilt_imgproc as imgproc;

#[doc(inline)]
pub use monofilt_io as io;
