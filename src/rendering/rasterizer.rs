use crate::error::RenderError;
use crate::models::DisplaySpec;
use mono_dither::{DitherConfig, Ditherer, MonoFrame};
use resvg::usvg::{self, Transform};
use std::borrow::Cow;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Rasterizes dashboard SVG into RGBA pixels for the ditherer.
pub struct SvgRasterizer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
}

impl SvgRasterizer {
    /// Create a rasterizer with fonts loaded from the provided data
    pub fn with_fonts(fonts: Vec<(String, Cow<'static, [u8]>)>) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data.into_owned());
            tracing::debug!(font = %name, "Loaded font");
        }

        // Load system fonts as fallback
        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for SVG text rendering"
        );

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a rasterizer with system fonts only
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    /// Parse SVG and render it to straight RGBA, composited on white
    pub fn rasterize(&self, svg_data: &[u8], spec: DisplaySpec) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.render_pixmap(svg_data, spec)?;
        let rgba = flatten_on_white(pixmap.data());
        debug_assert_eq!(rgba.len(), spec.rgba_len());
        Ok(rgba)
    }

    /// Rasterize and dither to a 1-bit frame
    pub fn render_mono(
        &self,
        svg_data: &[u8],
        spec: DisplaySpec,
        config: DitherConfig,
    ) -> Result<MonoFrame, RenderError> {
        let rgba = self.rasterize(svg_data, spec)?;
        let frame = Ditherer::new(config).dither(&rgba, spec.width, spec.height)?;
        tracing::debug!(
            width = spec.width,
            height = spec.height,
            lit = frame.lit_pixels(),
            "Dithered frame"
        );
        Ok(frame)
    }

    fn render_pixmap(&self, svg_data: &[u8], spec: DisplaySpec) -> Result<Pixmap, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let scale_x = spec.width as f32 / svg_size.width();
        let scale_y = spec.height as f32 / svg_size.height();
        let scale = scale_x.min(scale_y);

        let scaled_width = svg_size.width() * scale;
        let scaled_height = svg_size.height() * scale;
        let offset_x = (spec.width as f32 - scaled_width) / 2.0;
        let offset_y = (spec.height as f32 - scaled_height) / 2.0;

        let mut pixmap =
            Pixmap::new(spec.width, spec.height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert premultiplied RGBA to opaque RGBA over a white background.
///
/// For premultiplied `c`, compositing on white is `c + 255 - a`.
fn flatten_on_white(premultiplied: &[u8]) -> Vec<u8> {
    premultiplied
        .chunks_exact(4)
        .flat_map(|px| {
            let cover = 255 - px[3];
            [
                px[0].saturating_add(cover),
                px[1].saturating_add(cover),
                px[2].saturating_add(cover),
                255,
            ]
        })
        .collect()
}
