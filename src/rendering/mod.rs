pub mod encode;
pub mod rasterizer;

pub use encode::encode_mask_png;
pub use rasterizer::SvgRasterizer;
