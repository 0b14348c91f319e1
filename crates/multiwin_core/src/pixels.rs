//! Pixel sources for sprite textures
//!
//! Every window uploads its own copy of a pixel source to its own context,
//! so loading is kept separate from GPU concerns: this module only produces
//! CPU-side RGBA buffers.

use std::path::Path;

use crate::error::AssetError;

/// Decoded RGBA8 pixels ready for GPU upload
#[derive(Clone, Debug, PartialEq)]
pub struct PixelData {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes
    pub rgba: Vec<u8>,
}

impl PixelData {
    /// Wrap an existing RGBA buffer, validating its shape
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::Unsupported(format!(
                "zero-sized image ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AssetError::Unsupported(format!(
                "buffer is {} bytes, expected {} for {}x{} RGBA",
                rgba.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// Load and decode a PNG file, converting to RGBA8
    pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let img = image::ImageReader::open(path)?.decode()?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded '{}' ({}x{})", path.display(), width, height);
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Decode PNG bytes already in memory, converting to RGBA8
    pub fn decode_png(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Generate a two-color checkerboard
    ///
    /// The built-in sprite used when no image asset is configured, so the
    /// demos run from a clean checkout.
    pub fn checkerboard(width: u32, height: u32, cell: u32, dark: [u8; 4], light: [u8; 4]) -> Self {
        let cell = cell.max(1);
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let odd = ((x / cell) + (y / cell)) % 2 == 1;
                rgba.extend_from_slice(if odd { &light } else { &dark });
            }
        }
        Self { width, height, rgba }
    }

    /// Drawn extent of these pixels as a float vector
    pub fn size(&self) -> multiwin_math::Vec2 {
        multiwin_math::Vec2::new(self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_validates_length() {
        assert!(PixelData::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelData::from_rgba(2, 2, vec![0; 15]),
            Err(AssetError::Unsupported(_))
        ));
        assert!(matches!(
            PixelData::from_rgba(0, 2, Vec::new()),
            Err(AssetError::Unsupported(_))
        ));
    }

    #[test]
    fn test_checkerboard_dimensions() {
        let pixels = PixelData::checkerboard(8, 4, 2, [0, 0, 0, 255], [255, 255, 255, 255]);
        assert_eq!(pixels.width, 8);
        assert_eq!(pixels.height, 4);
        assert_eq!(pixels.rgba.len(), 8 * 4 * 4);
        assert_eq!(pixels.size(), multiwin_math::Vec2::new(8.0, 4.0));
    }

    #[test]
    fn test_checkerboard_alternates_cells() {
        let dark = [10, 20, 30, 255];
        let light = [200, 210, 220, 255];
        let pixels = PixelData::checkerboard(4, 4, 2, dark, light);

        let px = |x: usize, y: usize| {
            let i = (y * 4 + x) * 4;
            [pixels.rgba[i], pixels.rgba[i + 1], pixels.rgba[i + 2], pixels.rgba[i + 3]]
        };

        assert_eq!(px(0, 0), dark);
        assert_eq!(px(2, 0), light);
        assert_eq!(px(0, 2), light);
        assert_eq!(px(2, 2), dark);
    }

    #[test]
    fn test_checkerboard_zero_cell_does_not_panic() {
        let pixels = PixelData::checkerboard(4, 4, 0, [0; 4], [255; 4]);
        assert_eq!(pixels.rgba.len(), 64);
    }

    #[test]
    fn test_png_roundtrip() {
        // Encode a checkerboard through the PNG codec and decode it back
        let original = PixelData::checkerboard(6, 6, 3, [1, 2, 3, 255], [250, 251, 252, 255]);

        let mut encoded = Vec::new();
        image::write_buffer_with_format(
            &mut std::io::Cursor::new(&mut encoded),
            &original.rgba,
            original.width,
            original.height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .unwrap();

        let decoded = PixelData::decode_png(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_png_rejects_garbage() {
        assert!(matches!(
            PixelData::decode_png(&[0xde, 0xad, 0xbe, 0xef]),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn test_load_png_missing_file() {
        let err = PixelData::load_png("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }
}
