//! Output of a dithering pass.

/// Packed length for a `width` x `height` frame.
///
/// `width` is expected to be a multiple of 8.
#[inline]
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize / 8) * height as usize
}

/// A dithered monochrome frame.
///
/// Holds the packed bitmap and the 0/255 mask produced by the same pass,
/// so the two are always consistent with each other.
///
/// # Example
///
/// ```
/// use mono_dither::{dither, MonoFrame};
///
/// let rgba = vec![255u8; 16 * 2 * 4];
/// let frame: MonoFrame = dither(&rgba, 16, 2, 0.25, None).unwrap();
///
/// assert_eq!(frame.bytes_per_row(), 2);
/// assert_eq!(frame.packed(), &[0xFF; 4]);
/// assert!(frame.is_on(15, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoFrame {
    packed: Vec<u8>,
    mask: Vec<u8>,
    width: u32,
    height: u32,
}

impl MonoFrame {
    pub(crate) fn new(packed: Vec<u8>, mask: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(packed.len(), packed_len(width, height));
        debug_assert_eq!(mask.len(), width as usize * height as usize);
        Self {
            packed,
            mask,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per packed row (`width / 8`).
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.width as usize / 8
    }

    /// Packed bitmap, row-major, MSB first, no header.
    #[inline]
    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    /// One byte per pixel, each 0 or 255.
    #[inline]
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Whether the pixel at `(x, y)` is on, read from the packed bitmap.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the frame.
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let byte = self.packed[y as usize * self.bytes_per_row() + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Number of pixels switched on.
    pub fn lit_pixels(&self) -> usize {
        self.packed.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Consume the frame, returning `(packed, mask)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.packed, self.mask)
    }
}
