//! Optional image pre-processing before the analysis call.
//!
//! Photos of handwritten pages are often low-contrast. Converting to grayscale, stretching the
//! contrast and sharpening improves the transcription on such photos. The step is best effort: any
//! decode or encode failure returns the input unchanged.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";

const CONTRAST: f32 = 40.0;
const SHARPEN_SIGMA: f32 = 1.0;
const SHARPEN_THRESHOLD: i32 = 2;

/// Grayscale, contrast boost and sharpen, re-encoded as PNG.
///
/// # Returns
/// The PNG bytes, or `bytes` unchanged when the image cannot be decoded or re-encoded.
pub fn preprocess_image(bytes: &[u8]) -> Vec<u8> {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!(error = %e, "could not decode image, sending it unprocessed");
            return bytes.to_vec();
        }
    };

    match encode_png(&enhance(&img)) {
        Ok(png) => {
            tracing::debug!(before = bytes.len(), after = png.len(), "image pre-processed");
            png
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not encode processed image, sending it unprocessed");
            bytes.to_vec()
        }
    }
}

fn enhance(img: &DynamicImage) -> DynamicImage {
    img.grayscale()
        .adjust_contrast(CONTRAST)
        .unsharpen(SHARPEN_SIGMA, SHARPEN_THRESHOLD)
}

fn encode_png(img: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// MIME type for an essay image path, by extension. `None` for unsupported files.
pub fn mime_for_path(path: impl AsRef<Path>) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(MIME_JPEG),
        "png" => Some(MIME_PNG),
        _ => None,
    }
}

/// MIME type detected from the image signature. `None` unless JPEG or PNG.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => Some(MIME_JPEG),
        ImageFormat::Png => Some(MIME_PNG),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgb, RgbImage};

    fn sample_png() -> Vec<u8> {
        let img = RgbImage::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 { Rgb([200, 40, 40]) } else { Rgb([90, 90, 200]) }
        });
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn produces_grayscale_png_of_same_size() {
        let out = preprocess_image(&sample_png());
        assert_eq!(sniff_mime(&out), Some(MIME_PNG));

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.color(), ColorType::L8);
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn undecodable_input_is_returned_unchanged() {
        let garbage = b"definitely not an image".to_vec();
        assert_eq!(preprocess_image(&garbage), garbage);
    }

    #[test]
    fn mime_by_extension() {
        assert_eq!(mime_for_path("redacoes/ana.JPG"), Some(MIME_JPEG));
        assert_eq!(mime_for_path("b.jpeg"), Some(MIME_JPEG));
        assert_eq!(mime_for_path("c.png"), Some(MIME_PNG));
        assert_eq!(mime_for_path("d.gif"), None);
        assert_eq!(mime_for_path("sem_extensao"), None);
    }

    #[test]
    fn mime_by_signature() {
        assert_eq!(sniff_mime(&sample_png()), Some(MIME_PNG));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]), Some(MIME_JPEG));
        assert_eq!(sniff_mime(b"GIF89a......"), None);
    }
}
