//! The dithering pass.

use crate::config::{DitherConfig, SPLIT_THRESHOLD};
use crate::error::DitherError;
use crate::frame::{packed_len, MonoFrame};
use crate::luminance::luminance;
use crate::pack::BitPacker;
use crate::window::{ErrorWindow, DIVISOR};

const ON: u8 = 255;
const OFF: u8 = 0;

/// Reusable ditherer holding a validated-on-use [`DitherConfig`].
///
/// [`dither()`](Self::dither) takes `&self`, so one value can process any
/// number of frames. Each call owns its own error window; nothing is
/// carried over between frames.
///
/// # Example
///
/// ```
/// use mono_dither::{DitherConfig, Ditherer};
///
/// let ditherer = Ditherer::new(DitherConfig::new().split_column(Some(8)));
/// let black = vec![0u8; 16 * 4 * 4];
/// let frame = ditherer.dither(&black, 16, 4).unwrap();
/// assert_eq!(frame.lit_pixels(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ditherer {
    config: DitherConfig,
}

impl Ditherer {
    pub fn new(config: DitherConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &DitherConfig {
        &self.config
    }

    /// Dither an RGBA buffer into a [`MonoFrame`].
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidInput`] if `rgba.len() != width * height * 4`,
    /// `width` is not a positive multiple of 8, or the cutoff is outside
    /// (0, 1). A zero `height` with an empty buffer yields an empty frame.
    pub fn dither(&self, rgba: &[u8], width: u32, height: u32) -> Result<MonoFrame, DitherError> {
        check_input(rgba, width, height)?;
        self.config.validate()?;

        let w = width as usize;
        let h = height as usize;
        let threshold = self.config.threshold();
        let split = self.config.split_column.map(|c| c as usize);

        let mut window = ErrorWindow::new(w);
        let mut packer = BitPacker::with_capacity(packed_len(width, height));
        let mut mask = vec![OFF; w * h];

        for (y, row) in rgba.chunks_exact(w * 4).enumerate() {
            for (x, px) in row.chunks_exact(4).enumerate() {
                let lum = luminance(px[0], px[1], px[2]);
                let expected = lum + window.accumulated(x).floor() as i32;

                let on = match split {
                    Some(column) if x >= column => lum > SPLIT_THRESHOLD,
                    _ => expected > threshold,
                };
                let mono = if on { ON } else { OFF };

                window.diffuse(x, (expected - mono as i32) as f64 / DIVISOR);
                packer.push(on);
                mask[y * w + x] = mono;
            }
            window.advance();
        }

        Ok(MonoFrame::new(packer.finish(), mask, width, height))
    }
}

/// Dither an RGBA buffer with an explicit cutoff and optional split column.
///
/// Shorthand for building a [`Ditherer`] for a single frame.
///
/// ```
/// let rgba = vec![0u8; 8 * 4];
/// let frame = mono_dither::dither(&rgba, 8, 1, 0.25, None).unwrap();
/// assert_eq!(frame.packed(), &[0x00]);
/// ```
pub fn dither(
    rgba: &[u8],
    width: u32,
    height: u32,
    cutoff: f64,
    split_column: Option<u32>,
) -> Result<MonoFrame, DitherError> {
    let config = DitherConfig::new()
        .cutoff(cutoff)
        .split_column(split_column);
    Ditherer::new(config).dither(rgba, width, height)
}

fn check_input(rgba: &[u8], width: u32, height: u32) -> Result<(), DitherError> {
    if width == 0 || width % 8 != 0 {
        return Err(DitherError::invalid(format!(
            "width {width} must be a positive multiple of 8"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| DitherError::invalid(format!("{width}x{height} is too large")))?;
    if rgba.len() != expected {
        return Err(DitherError::invalid(format!(
            "buffer holds {} bytes, expected {expected} for {width}x{height} RGBA",
            rgba.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gray_row(values: &[u8]) -> Vec<u8> {
        values.iter().flat_map(|&v| [v, v, v, 255]).collect()
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = dither(&[0; 31], 8, 1, 0.25, None).unwrap_err();
        assert!(matches!(err, DitherError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_width_not_multiple_of_8() {
        let err = dither(&[0; 12 * 4], 12, 1, 0.25, None).unwrap_err();
        assert!(err.to_string().contains("multiple of 8"));
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(dither(&[], 0, 1, 0.25, None).is_err());
    }

    #[test]
    fn test_zero_height_is_empty_frame() {
        let frame = dither(&[], 8, 0, 0.25, None).unwrap();
        assert_eq!(frame.packed(), &[] as &[u8]);
        assert_eq!(frame.mask(), &[] as &[u8]);
        assert_eq!((frame.width(), frame.height()), (8, 0));
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_rejects_bad_cutoff() {
        let rgba = gray_row(&[0; 8]);
        assert!(dither(&rgba, 8, 1, 0.0, None).is_err());
        assert!(dither(&rgba, 8, 1, 1.0, None).is_err());
    }

    #[test]
    fn test_half_black_half_white_row() {
        let rgba = gray_row(&[0, 0, 0, 0, 255, 255, 255, 255]);
        let frame = dither(&rgba, 8, 1, 0.25, None).unwrap();

        assert_eq!(frame.mask(), &[0, 0, 0, 0, 255, 255, 255, 255]);
        assert_eq!(frame.packed(), &[0b0000_1111]);
    }

    #[test]
    fn test_error_carries_to_next_pixel() {
        // Luminance 50 stays under threshold 63 and leaves +50/8 = 6.25 on
        // the next two columns. The second pixel sees 50 + 6 = 56, the
        // third 50 + floor(6.25 + 56/8) = 63, still off; the fourth crosses.
        let rgba = gray_row(&[50; 8]);
        let lum = luminance(50, 50, 50);
        assert_eq!(lum, 50);

        let frame = dither(&rgba, 8, 1, 0.25, None).unwrap();
        assert_eq!(&frame.mask()[..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_cutoff_is_strictly_greater() {
        // threshold for 0.25 is 63; gray 64 truncates to luminance 63
        let mut values = [0u8; 8];
        values[0] = 64;
        assert_eq!(luminance(64, 64, 64), 63);
        let frame = dither(&gray_row(&values), 8, 1, 0.25, None).unwrap();
        assert_eq!(frame.mask()[0], 0);

        values[0] = 65;
        let frame = dither(&gray_row(&values), 8, 1, 0.25, None).unwrap();
        assert_eq!(frame.mask()[0], 255);
    }

    #[test]
    fn test_ditherer_reusable() {
        let ditherer = Ditherer::new(DitherConfig::new().cutoff(0.5));
        let rgba = gray_row(&[100, 200, 30, 180, 90, 10, 240, 128]);
        let a = ditherer.dither(&rgba, 8, 1).unwrap();
        let b = ditherer.dither(&rgba, 8, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(ditherer.config().threshold(), 127);
    }

    #[test]
    fn test_alpha_ignored() {
        let opaque = gray_row(&[0, 255, 0, 255, 0, 255, 0, 255]);
        let mut transparent = opaque.clone();
        for px in transparent.chunks_exact_mut(4) {
            px[3] = 0;
        }
        let a = dither(&opaque, 8, 1, 0.25, None).unwrap();
        let b = dither(&transparent, 8, 1, 0.25, None).unwrap();
        assert_eq!(a, b);
    }
}
