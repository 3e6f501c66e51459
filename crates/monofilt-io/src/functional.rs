use std::{
    io::{Cursor, Seek, Write},
    path::Path,
};

use image::{DynamicImage, GrayImage, ImageFormat};
use monofilt_image::{Image, ImageSize};

use crate::error::IoError;

/// Define the RGB weights for the grayscale conversion.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Luma of an RGB triplet, `round(0.299 * R + 0.587 * G + 0.114 * B)` with ties to even.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (RW * r as f64 + GW * g as f64 + BW * b as f64).round_ties_even() as u8
}

/// Reads an image from the given file path as a single-channel 8-bit image.
///
/// The method tries to read from any image format supported by the image crate
/// and converts the pixels to greyscale, see [`decode_image_gray8`].
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A greyscale image.
pub fn read_image_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    log::debug!("read {} bytes from {}", bytes.len(), file_path.display());

    decode_image_gray8(&bytes)
}

/// Decodes an encoded image held in memory as a single-channel 8-bit image.
///
/// The format is guessed from the content. Pixels are converted as follows:
///
/// * greyscale: passed through;
/// * greyscale with alpha: the intensity channel is kept;
/// * RGB and RGBA: `round(0.299 * R + 0.587 * G + 0.114 * B)`, alpha is ignored.
///
/// Palette and low bit depth files are expanded by the codec before they reach
/// this function: indexed PNGs and GIFs arrive as RGB or RGBA and go through the
/// luma conversion, 1, 2 and 4-bit greyscale PNGs arrive as 8-bit greyscale.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedPixelFormat`] for any other layout, e.g.
/// 16-bit or floating point images.
pub fn decode_image_gray8(bytes: &[u8]) -> Result<Image<u8>, IoError> {
    let img = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {:?} image of {}", img.color(), size);

    let data = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw(),
        DynamicImage::ImageLumaA8(buf) => buf.pixels().map(|p| p[0]).collect(),
        DynamicImage::ImageRgb8(buf) => buf.pixels().map(|p| luma(p[0], p[1], p[2])).collect(),
        DynamicImage::ImageRgba8(buf) => buf.pixels().map(|p| luma(p[0], p[1], p[2])).collect(),
        other => {
            return Err(IoError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            )))
        }
    };

    Ok(Image::new(size, data)?)
}

/// Writes a greyscale image to the given file path.
///
/// The output format is inferred from the file extension.
///
/// # Arguments
///
/// * `file_path` - The destination path, e.g. `out.png` or `out.bmp`.
/// * `image` - The image to write.
pub fn write_image_gray8(file_path: impl AsRef<Path>, image: &Image<u8>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    to_gray_image(image)?.save_with_format(file_path, format)?;
    log::debug!("wrote {} as {:?} to {}", image.size(), format, file_path.display());

    Ok(())
}

/// Encodes a greyscale image into a writer with an explicit format.
///
/// # Arguments
///
/// * `writer` - The destination stream.
/// * `image` - The image to encode.
/// * `format` - The output format, e.g. [`ImageFormat::Png`].
pub fn encode_image_gray8<W: Write + Seek>(
    writer: &mut W,
    image: &Image<u8>,
    format: ImageFormat,
) -> Result<(), IoError> {
    to_gray_image(image)?.write_to(writer, format)?;
    Ok(())
}

// utility function to wrap the pixels into an image crate buffer
fn to_gray_image(image: &Image<u8>) -> Result<GrayImage, IoError> {
    GrayImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_slice().to_vec(),
    )
    .ok_or_else(|| {
        IoError::UnsupportedPixelFormat(format!("cannot wrap {} as an 8-bit image", image.size()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, LumaA, Rgb, RgbImage, Rgba};

    fn gradient() -> Result<Image<u8>, IoError> {
        let data = (0..6 * 4).map(|i| (i * 10) as u8).collect();
        Ok(Image::new([6, 4].into(), data)?)
    }

    #[test]
    fn read_write_gray_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = gradient()?;
        write_image_gray8(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_gray8(&file_path)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn read_rgb_applies_luma() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        let mut rgb = RgbImage::new(4, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        rgb.put_pixel(3, 0, Rgb([10, 20, 30]));
        rgb.save(&file_path)?;

        let gray = read_image_gray8(&file_path)?;
        assert_eq!(gray.as_slice(), &[76, 150, 29, 18]);
        Ok(())
    }

    #[test]
    fn decode_rgba_ignores_alpha() -> Result<(), IoError> {
        let mut rgba = ImageBuffer::<Rgba<u8>, _>::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([255, 255, 255, 17]));

        let mut bytes = Cursor::new(Vec::new());
        rgba.write_to(&mut bytes, ImageFormat::Png)?;

        let gray = decode_image_gray8(bytes.get_ref())?;
        assert_eq!(gray.as_slice(), &[76, 255]);
        Ok(())
    }

    #[test]
    fn decode_luma_alpha_keeps_intensity() -> Result<(), IoError> {
        let mut la = ImageBuffer::<LumaA<u8>, _>::new(3, 1);
        la.put_pixel(0, 0, LumaA([12, 255]));
        la.put_pixel(1, 0, LumaA([34, 0]));
        la.put_pixel(2, 0, LumaA([56, 128]));

        let mut bytes = Cursor::new(Vec::new());
        la.write_to(&mut bytes, ImageFormat::Png)?;

        let gray = decode_image_gray8(bytes.get_ref())?;
        assert_eq!(gray.as_slice(), &[12, 34, 56]);
        Ok(())
    }

    #[test]
    fn decode_palette_png_applies_luma() -> Result<(), IoError> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 3, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![255u8, 0, 0, 0, 255, 0, 10, 20, 30]);
            let mut writer = encoder
                .write_header()
                .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
            writer
                .write_image_data(&[0, 1, 2])
                .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
        }

        let gray = decode_image_gray8(&bytes)?;
        assert_eq!(gray.as_slice(), &[76, 150, 18]);
        Ok(())
    }

    #[test]
    fn decode_16bit_is_unsupported() -> Result<(), IoError> {
        let l16 = ImageBuffer::<image::Luma<u16>, _>::from_pixel(2, 2, image::Luma([1000u16]));

        let mut bytes = Cursor::new(Vec::new());
        l16.write_to(&mut bytes, ImageFormat::Png)?;

        let res = decode_image_gray8(bytes.get_ref());
        assert!(matches!(res, Err(IoError::UnsupportedPixelFormat(_))));
        Ok(())
    }

    #[test]
    fn encode_to_stream_with_format() -> Result<(), IoError> {
        let image = gradient()?;
        for format in [ImageFormat::Png, ImageFormat::Tiff] {
            let mut bytes = Cursor::new(Vec::new());
            encode_image_gray8(&mut bytes, &image, format)?;
            assert_eq!(image::guess_format(bytes.get_ref())?, format);
            assert_eq!(decode_image_gray8(bytes.get_ref())?, image);
        }
        Ok(())
    }

    #[test]
    fn missing_file() {
        let res = read_image_gray8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn unknown_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let res = write_image_gray8(tmp_dir.path().join("image.nope"), &gradient()?);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

        let res = write_image_gray8(tmp_dir.path().join("image"), &gradient()?);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
