use crate::error::OcrError;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Widest image we ever produce; thin strips are scaled by width instead
const MAX_WIDTH: u32 = 4000;

/// Scale image to `target_height`, keeping the aspect ratio.
/// Small images are enlarged as well; OCR.Space does better on taller input.
/// When that would exceed `MAX_WIDTH`, the width is capped and the height follows.
pub fn apply(image: DynamicImage, target_height: u32) -> Result<DynamicImage, OcrError> {
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Err(OcrError::Preprocessing("Image has no pixels".to_string()));
    }

    let scale = target_height as f64 / height as f64;
    let scaled_width = (width as f64 * scale).round();

    let (new_width, new_height) = if scaled_width > MAX_WIDTH as f64 {
        let scale = MAX_WIDTH as f64 / width as f64;
        let capped_height = ((height as f64 * scale).round() as u32).clamp(1, target_height);
        (MAX_WIDTH, capped_height)
    } else {
        ((scaled_width as u32).max(1), target_height)
    };

    if (new_width, new_height) == (width, height) {
        return Ok(image);
    }

    Ok(image.resize_exact(new_width, new_height, FilterType::Lanczos3))
}
