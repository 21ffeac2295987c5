//! mono-dither: 1-bit error diffusion for monochrome e-ink panels
//!
//! This crate converts an RGBA raster into the two buffers a black and
//! white e-paper dashboard needs:
//!
//! - a **packed bitmap**, 8 pixels per byte, most significant bit first,
//!   which is what the panel controller consumes
//! - a **mask**, one byte per pixel holding 0 or 255, which is easy to wrap
//!   into a grayscale PNG for previewing
//!
//! # Quick Start
//!
//! ```
//! use mono_dither::{DitherConfig, Ditherer};
//!
//! // 8x1 image: four black pixels, four white pixels
//! let mut rgba = Vec::new();
//! for v in [0u8, 0, 0, 0, 255, 255, 255, 255] {
//!     rgba.extend_from_slice(&[v, v, v, 255]);
//! }
//!
//! let frame = Ditherer::new(DitherConfig::new()).dither(&rgba, 8, 1).unwrap();
//! assert_eq!(frame.packed(), &[0x0F]);
//! assert_eq!(frame.mask(), &[0, 0, 0, 0, 255, 255, 255, 255]);
//! ```
//!
//! # Diffusion Kernel
//!
//! The kernel is a six-neighbour variant of Atkinson's:
//!
//! ```text
//!          X   1   1
//!      1   1   1
//!          1
//! ```
//!
//! Every weight is 1/8, so only 6/8 of the quantization error is carried
//! forward; the remaining quarter is dropped.
//!
//! # Split Column
//!
//! [`DitherConfig::split_column`] switches every column at or right of the
//! boundary to a plain threshold (luminance above
//! [`SPLIT_THRESHOLD`]), keeping that region crisp while the rest of the
//! frame is dithered.

mod config;
mod ditherer;
mod error;
mod frame;
mod luminance;
mod pack;
mod window;


pub use config::{DitherConfig, DEFAULT_CUTOFF, SPLIT_THRESHOLD};
pub use ditherer::{dither, Ditherer};
pub use error::DitherError;
pub use frame::{packed_len, MonoFrame};
pub use luminance::luminance;
