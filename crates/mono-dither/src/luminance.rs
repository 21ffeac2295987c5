/// Weighted luminance of an sRGB pixel, truncated towards zero.
///
/// Uses the 0.30 / 0.59 / 0.11 weights directly on the encoded values;
/// no gamma decoding is applied.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> i32 {
    (r as f64 * 0.3 + g as f64 * 0.59 + b as f64 * 0.11).floor() as i32
}
