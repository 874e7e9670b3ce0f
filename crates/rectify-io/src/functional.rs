use std::path::Path;

use image::{codecs::jpeg::JpegEncoder, ExtendedColorType};
use rectify_image::{Image, ImageSize};

use crate::error::IoError;

/// The JPEG quality used when the caller has no preference.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Decodes an encoded image held in memory into an 8-bit RGB image.
///
/// The container format is guessed from the data. Any color type supported by the image
/// crate is converted to 8-bit RGB; an alpha channel is dropped.
///
/// # Arguments
///
/// * `bytes` - The encoded image, e.g. the content of a JPEG or PNG file.
///
/// # Example
///
/// ```no_run
/// use rectify_io::functional as F;
///
/// let bytes = std::fs::read("document.jpg").unwrap();
/// let image = F::decode_image_rgb8(&bytes).unwrap();
/// assert_eq!(image.num_channels(), 3);
/// ```
pub fn decode_image_rgb8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let img = image::load_from_memory(bytes)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {:?} image of size {}", img.color(), size);

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    decode_image_rgb8(&bytes)
}

/// Writes an 8-bit RGB image to the given file path.
///
/// The format is chosen from the file extension.
///
/// # Arguments
///
/// * `file_path` - The destination path, e.g. `out.png`.
/// * `image` - The image to write.
pub fn write_image_any(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Encodes an 8-bit RGB image as JPEG.
///
/// # Arguments
///
/// * `image` - The image to encode.
/// * `quality` - The JPEG quality in `1..=100`.
///
/// # Returns
///
/// The bytes of the JPEG file.
pub fn encode_image_jpeg(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::InvalidJpegQuality(quality));
    }

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality).encode(
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        ExtendedColorType::Rgb8,
    )?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn gradient(size: ImageSize) -> Result<Image<u8, 3>, IoError> {
        let mut data = Vec::with_capacity(size.area() * 3);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, 128]);
            }
        }
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn encode_decode_jpeg() -> Result<(), IoError> {
        let size = ImageSize {
            width: 32,
            height: 24,
        };
        let image = gradient(size)?;

        let jpeg = encode_image_jpeg(&image, DEFAULT_JPEG_QUALITY)?;
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let decoded = decode_image_rgb8(&jpeg)?;
        assert_eq!(decoded.size(), size);

        // lossy, but close at high quality
        let max_diff = image
            .as_slice()
            .iter()
            .zip(decoded.as_slice())
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap_or(0);
        assert!(max_diff < 24, "max diff {max_diff}");

        Ok(())
    }

    #[test]
    fn invalid_jpeg_quality() -> Result<(), IoError> {
        let image = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        assert!(matches!(
            encode_image_jpeg(&image, 0),
            Err(IoError::InvalidJpegQuality(0))
        ));
        assert!(matches!(
            encode_image_jpeg(&image, 101),
            Err(IoError::InvalidJpegQuality(101))
        ));
        Ok(())
    }

    #[test]
    fn decode_garbage() {
        let result = decode_image_rgb8(b"definitely not an image");
        assert!(matches!(result, Err(IoError::ImageDecodeError(_))));
    }

    #[test]
    fn decode_rgba_drops_alpha() -> Result<(), IoError> {
        let rgba = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 255])
            .expect("buffer matches dimensions");
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;

        let image = decode_image_rgb8(&png)?;
        assert_eq!(image.size(), [2, 1].into());
        assert_eq!(image.as_slice(), &[10, 20, 30, 40, 50, 60]);

        Ok(())
    }

    #[test]
    fn write_read_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = gradient(ImageSize {
            width: 16,
            height: 8,
        })?;
        write_image_any(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back, image);

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let result = read_image_any_rgb8("does/not/exist.png");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }
}
