//! Dithering configuration.
//!
//! [`DitherConfig`] carries the two knobs a caller can turn: the luminance
//! cutoff and the optional split-column boundary.

use crate::error::DitherError;

/// Default cutoff, as a fraction of full scale (threshold 63 of 255).
pub const DEFAULT_CUTOFF: f64 = 0.25;

/// Fixed luminance threshold used right of the split column.
pub const SPLIT_THRESHOLD: i32 = 120;

/// Configuration for a dithering pass.
///
/// # Example
///
/// ```
/// use mono_dither::DitherConfig;
///
/// let config = DitherConfig::new().cutoff(0.5).split_column(Some(400));
/// assert_eq!(config.threshold(), 127);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherConfig {
    /// Fraction of the 0-255 luminance scale above which a pixel (plus its
    /// accumulated error) turns on. Must lie strictly inside (0, 1).
    ///
    /// Default: `0.25`
    pub cutoff: f64,

    /// Columns `x >= split_column` bypass error diffusion and use a plain
    /// threshold against [`SPLIT_THRESHOLD`].
    ///
    /// Default: `None`
    pub split_column: Option<u32>,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            split_column: None,
        }
    }
}

impl DitherConfig {
    /// Create a configuration with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the luminance cutoff.
    #[inline]
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set or clear the split-column boundary.
    #[inline]
    pub fn split_column(mut self, column: Option<u32>) -> Self {
        self.split_column = column;
        self
    }

    /// Integer threshold the diffused value is compared against,
    /// `floor(cutoff * 255)`.
    #[inline]
    pub fn threshold(&self) -> i32 {
        (self.cutoff * 255.0).floor() as i32
    }

    /// Check the cutoff lies strictly inside (0, 1).
    pub fn validate(&self) -> Result<(), DitherError> {
        if !self.cutoff.is_finite() || self.cutoff <= 0.0 || self.cutoff >= 1.0 {
            return Err(DitherError::invalid(format!(
                "cutoff {} must lie strictly between 0 and 1",
                self.cutoff
            )));
        }
        Ok(())
    }
}
