//! # Image Assets
//!
//! Images are decoded once, before any layout runs, and handed to the
//! report layouts as [`Assets`]. Layout itself never touches the file system
//! and has nothing to wait on.
//!
//! Sources may be file paths, `data:image/...;base64,` URIs, or raw bytes.
//! JPEG data is kept as-is and embedded with DCTDecode. PNG data is decoded
//! to RGB with a separate alpha channel for an SMask.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use log::debug;

use crate::error::FolioError;

/// A decoded image ready for PDF embedding.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixel_data: ImagePixelData,
    pub width_px: u32,
    pub height_px: u32,
}

impl LoadedImage {
    /// Height over width of the pixel grid.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width_px == 0 {
            return 1.0;
        }
        self.height_px as f64 / self.width_px as f64
    }

    /// Size in mm when scaled to `max_width`, never enlarged past its natural
    /// size at 96 dpi.
    pub fn fit_width(&self, max_width: f64) -> (f64, f64) {
        let natural_width = self.width_px as f64 * 25.4 / 96.0;
        let width = natural_width.min(max_width).max(0.0);
        (width, width * self.aspect_ratio())
    }
}

/// The pixel data in a format the PDF writer can consume directly.
#[derive(Debug, Clone)]
pub enum ImagePixelData {
    /// Raw JPEG bytes, embedded with DCTDecode.
    Jpeg {
        data: Vec<u8>,
        color_space: JpegColorSpace,
    },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes. None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
}

/// Pre-decoded images a report may draw.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    /// Institutional logo for cover pages.
    pub logo: Option<Arc<LoadedImage>>,
    /// Schedule chart for the PPR's "Specifications and Schedule" section.
    pub schedule_image: Option<Arc<LoadedImage>>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logo(mut self, image: LoadedImage) -> Self {
        self.logo = Some(Arc::new(image));
        self
    }

    pub fn with_schedule_image(mut self, image: LoadedImage) -> Self {
        self.schedule_image = Some(Arc::new(image));
        self
    }

    /// Decode the logo and schedule image from optional sources.
    pub fn load(logo: Option<&str>, schedule_image: Option<&str>) -> Result<Self, FolioError> {
        let mut assets = Self::new();
        if let Some(src) = logo {
            assets = assets.with_logo(load_image(src)?);
        }
        if let Some(src) = schedule_image {
            assets = assets.with_schedule_image(load_image(src)?);
        }
        Ok(assets)
    }
}

/// Load an image from a source string.
///
/// Supported `src` formats:
/// - `data:image/...;base64,...`
/// - a file path (not on wasm32)
/// - raw base64-encoded image data
pub fn load_image(src: &str) -> Result<LoadedImage, FolioError> {
    let raw_bytes = read_source_bytes(src)?;
    load_image_bytes(&raw_bytes)
}

/// Decode in-memory image bytes, detecting the format from magic bytes.
pub fn load_image_bytes(data: &[u8]) -> Result<LoadedImage, FolioError> {
    if data.len() < 4 {
        return Err(FolioError::Image("image data too short".to_string()));
    }

    let image = if is_jpeg(data) {
        decode_jpeg(data)?
    } else if is_png(data) {
        decode_png(data)?
    } else {
        return Err(FolioError::Image(
            "unsupported image format (expected JPEG or PNG)".to_string(),
        ));
    };
    debug!("decoded image {}x{}", image.width_px, image.height_px);
    Ok(image)
}

fn read_source_bytes(src: &str) -> Result<Vec<u8>, FolioError> {
    if src.starts_with("data:image/") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| FolioError::Image("invalid data URI: missing comma".to_string()))?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    let path = Path::new(src);
    if path.is_file() {
        return std::fs::read(path).map_err(|source| FolioError::Io {
            path: src.to_string(),
            source,
        });
    }

    if looks_like_path(src) {
        return Err(FolioError::Io {
            path: src.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }

    base64_decode(src)
}

// Base64 never contains '.' or a backslash. A leading '/' is not enough: raw
// JPEG base64 starts with "/9j/".
fn looks_like_path(src: &str) -> bool {
    src.contains('.') || src.contains('\\')
}

fn base64_decode(input: &str) -> Result<Vec<u8>, FolioError> {
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| FolioError::Image(format!("base64 decode error: {}", e)))
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == [0x89, 0x50, 0x4E, 0x47]
}

/// Read dimensions only; the JPEG stream itself goes into the PDF untouched.
fn decode_jpeg(data: &[u8]) -> Result<LoadedImage, FolioError> {
    let (width, height) = image::io::Reader::with_format(Cursor::new(data), image::ImageFormat::Jpeg)
        .into_dimensions()
        .map_err(|e| FolioError::Image(format!("failed to read JPEG dimensions: {}", e)))?;

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Jpeg {
            data: data.to_vec(),
            color_space: jpeg_color_space(data),
        },
        width_px: width,
        height_px: height,
    })
}

/// Walk the JPEG markers to the start-of-frame segment and read its
/// component count.
fn jpeg_color_space(data: &[u8]) -> JpegColorSpace {
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof && i + 9 < data.len() {
            return if data[i + 9] == 1 {
                JpegColorSpace::DeviceGray
            } else {
                JpegColorSpace::DeviceRGB
            };
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    JpegColorSpace::DeviceRGB
}

fn decode_png(data: &[u8]) -> Result<LoadedImage, FolioError> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .map_err(|e| FolioError::Image(format!("failed to decode PNG: {}", e)))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixel_count = (width as usize) * (height as usize);
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }
    let opaque = alpha.iter().all(|&a| a == 255);

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Decoded {
            rgb,
            alpha: if opaque { None } else { Some(alpha) },
        },
        width_px: width,
        height_px: height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            width,
            height,
            image::ColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn test_magic_bytes() {
        assert!(is_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_jpeg(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(is_png(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!is_png(&[0x89, 0x50]));
    }

    #[test]
    fn test_rejects_short_and_unknown_data() {
        assert!(matches!(load_image_bytes(&[0, 1]), Err(FolioError::Image(_))));
        assert!(matches!(
            load_image_bytes(&[0, 1, 2, 3, 4]),
            Err(FolioError::Image(_))
        ));
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(load_image("data:image/png;base64").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_image("./definitely/not/here.png").unwrap_err();
        assert!(matches!(err, FolioError::Io { .. }));
    }

    #[test]
    fn test_opaque_png_has_no_alpha() {
        let loaded = load_image_bytes(&png_bytes(1, 1, [255, 0, 0, 255])).unwrap();
        match &loaded.pixel_data {
            ImagePixelData::Decoded { rgb, alpha } => {
                assert_eq!(rgb, &[255, 0, 0]);
                assert!(alpha.is_none());
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_translucent_png_keeps_alpha() {
        let loaded = load_image_bytes(&png_bytes(1, 1, [255, 0, 0, 128])).unwrap();
        match &loaded.pixel_data {
            ImagePixelData::Decoded { alpha, .. } => {
                assert_eq!(alpha.as_deref(), Some(&[128u8][..]));
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_jpeg_passes_through() {
        let img = image::RgbImage::from_fn(2, 2, |_, _| image::Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgb8)
            .unwrap();

        let loaded = load_image_bytes(&buf).unwrap();
        assert_eq!((loaded.width_px, loaded.height_px), (2, 2));
        match &loaded.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                assert_eq!(data, &buf);
                assert_eq!(*color_space, JpegColorSpace::DeviceRGB);
            }
            _ => panic!("JPEG should stay as Jpeg variant"),
        }
    }

    #[test]
    fn test_data_uri_source() {
        let b64 = base64::engine::general_purpose::STANDARD.encode(png_bytes(3, 2, [0, 255, 0, 255]));
        let loaded = load_image(&format!("data:image/png;base64,{}", b64)).unwrap();
        assert_eq!((loaded.width_px, loaded.height_px), (3, 2));
    }

    #[test]
    fn test_fit_width_scales_down_and_keeps_ratio() {
        let loaded = load_image_bytes(&png_bytes(1200, 600, [0, 0, 0, 255])).unwrap();
        let (w, h) = loaded.fit_width(160.0);
        assert!((w - 160.0).abs() < 1e-9);
        assert!((h - 80.0).abs() < 1e-9);

        let small = load_image_bytes(&png_bytes(96, 48, [0, 0, 0, 255])).unwrap();
        let (w, h) = small.fit_width(160.0);
        assert!((w - 25.4).abs() < 1e-9);
        assert!((h - 12.7).abs() < 1e-9);
    }

    #[test]
    fn test_assets_load_nothing() {
        let assets = Assets::load(None, None).unwrap();
        assert!(assets.logo.is_none());
        assert!(assets.schedule_image.is_none());
    }
}
