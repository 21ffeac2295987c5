use crate::error::RenderError;

// Upper bound on panel dimensions to keep render buffers reasonable
const MAX_DIMENSION: u32 = 2000;

/// Panel geometry the dashboard is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySpec {
    pub width: u32,
    pub height: u32,
}

impl DisplaySpec {
    /// 7.5" e-paper panel: 800x480
    pub const PANEL_7IN5: Self = Self {
        width: 800,
        height: 480,
    };

    /// Validate dimensions for 1-bit packing
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let valid = width > 0
            && height > 0
            && width % 8 == 0
            && width <= MAX_DIMENSION
            && height <= MAX_DIMENSION;
        if valid {
            Ok(Self { width, height })
        } else {
            Err(RenderError::UnsupportedDimensions { width, height })
        }
    }

    /// Size of the packed bitmap in bytes
    pub fn packed_len(&self) -> usize {
        mono_dither::packed_len(self.width, self.height)
    }

    /// Size of the RGBA raster in bytes
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self::PANEL_7IN5
    }
}
