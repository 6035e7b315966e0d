use crate::error::OcrError;
use image::{codecs::jpeg::JpegEncoder, DynamicImage};

/// Re-encode as baseline JPEG. Alpha is dropped since JPEG has no alpha channel.
pub fn apply(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, OcrError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| OcrError::Preprocessing(format!("Failed to encode JPEG: {}", e)))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn test_encode_produces_jpeg() {
        let img = RgbaImage::from_pixel(40, 20, Rgba([10, 200, 30, 128]));
        let jpeg = apply(&DynamicImage::ImageRgba8(img), 85).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(
            image::guess_format(&jpeg).unwrap(),
            image::ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (40, 20));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let mut img = image::RgbImage::new(64, 64);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8]);
        }
        let img = DynamicImage::ImageRgb8(img);

        let high = apply(&img, 95).unwrap();
        let low = apply(&img, 10).unwrap();
        assert!(low.len() < high.len());
    }
}
