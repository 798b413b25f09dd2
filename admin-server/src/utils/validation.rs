//! Upload validation helpers
//!
//! Centralized limits and checks for uploaded image files.
//! Limits mirror the back-office contract: catalog images are small
//! JPEG thumbnails, not print assets.

/// Required MIME type for every catalog image
pub const JPEG_MIME: &str = "image/jpeg";

/// Maximum size of a single catalog image (kilobytes)
pub const MAX_IMAGE_KB: usize = 50;

/// Maximum number of gallery images per product
pub const MAX_GALLERY_IMAGES: usize = 5;

/// Check the declared content type of an upload against the required MIME
pub fn is_jpeg_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case(JPEG_MIME))
}

/// Check whether a payload exceeds the size limit
pub fn exceeds_max_kb(len_bytes: usize, max_kb: usize) -> bool {
    len_bytes > max_kb * 1024
}

/// Check the magic bytes really are JPEG (declared content type can lie)
pub fn has_jpeg_magic(data: &[u8]) -> bool {
    matches!(image::guess_format(data), Ok(image::ImageFormat::Jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal JPEG header: SOI + APP0 marker
    const JPEG_MAGIC: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_is_jpeg_content_type() {
        assert!(is_jpeg_content_type(Some("image/jpeg")));
        assert!(is_jpeg_content_type(Some("IMAGE/JPEG")));
        assert!(!is_jpeg_content_type(Some("image/png")));
        assert!(!is_jpeg_content_type(None));
    }

    #[test]
    fn test_exceeds_max_kb() {
        assert!(!exceeds_max_kb(50 * 1024, 50));
        assert!(exceeds_max_kb(50 * 1024 + 1, 50));
        assert!(!exceeds_max_kb(0, 50));
    }

    #[test]
    fn test_has_jpeg_magic() {
        let mut data = JPEG_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 16]);
        assert!(has_jpeg_magic(&data));

        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(!has_jpeg_magic(&png));
        assert!(!has_jpeg_magic(b""));
    }
}
