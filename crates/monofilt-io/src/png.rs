use std::{fs, fs::File, io::BufWriter, path::Path};

use monofilt_image::{Image, ImageSize};
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Read a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Errors
///
/// Returns [`IoError::UnsupportedPixelFormat`] if the file is not an 8-bit
/// greyscale PNG. Use [`crate::functional::read_image_gray8`] to convert other layouts.
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    let (buf, size) = read_png_impl(file_path)?;
    Ok(Image::new(size, buf)?)
}

/// Writes the given PNG _(mono8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the greyscale data.
pub fn write_image_png_mono8(file_path: impl AsRef<Path>, image: &Image<u8>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(
        BufWriter::new(file),
        image.width() as u32,
        image.height() as u32,
    );
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image.as_slice())
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    log::debug!("wrote png {} to {}", image.size(), file_path.display());

    Ok(())
}

// utility function to read the png file
fn read_png_impl(file_path: impl AsRef<Path>) -> Result<(Vec<u8>, ImageSize), IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if let Some(extension) = file_path.extension() {
        if !extension.eq_ignore_ascii_case("png") {
            return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
        }
    } else {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedPixelFormat(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    buf.truncate(info.buffer_size());

    Ok((
        buf,
        ImageSize {
            width: info.width as usize,
            height: info.height as usize,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::{read_image_gray8, write_image_gray8};

    #[test]
    fn read_write_png_mono8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("mono8.png");

        let data = (0..5 * 3).map(|i| (i * 17) as u8).collect();
        let image = Image::new([5, 3].into(), data)?;
        write_image_png_mono8(&file_path, &image)?;

        assert_eq!(read_image_png_mono8(&file_path)?, image);
        // the generic reader agrees with the dedicated codec
        assert_eq!(read_image_gray8(&file_path)?, image);
        Ok(())
    }

    #[test]
    fn read_png_mono8_written_by_functional() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("functional.PNG");

        let image = Image::from_size_val([2, 7].into(), 200u8)?;
        write_image_gray8(&file_path, &image)?;

        assert_eq!(read_image_png_mono8(&file_path)?, image);
        Ok(())
    }

    #[test]
    fn read_png_rejects_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");
        image::RgbImage::new(2, 2).save(&file_path)?;

        let res = read_image_png_mono8(&file_path);
        assert!(matches!(res, Err(IoError::UnsupportedPixelFormat(_))));
        Ok(())
    }

    #[test]
    fn read_png_invalid_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.jpg");
        std::fs::write(&file_path, b"not an image")?;

        let res = read_image_png_mono8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
