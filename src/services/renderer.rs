use crate::assets::AssetLoader;
use crate::error::RenderError;
use crate::models::{parse_events, upcoming, AppConfig, DisplaySpec};
use crate::rendering::{encode_mask_png, SvgRasterizer};
use crate::services::template_service::DashboardContext;
use crate::services::TemplateService;
use chrono::{DateTime, Utc};
use mono_dither::DitherConfig;
use std::sync::Arc;

/// One rendered dashboard in every served representation
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Dithered mask as a grayscale PNG
    pub png_bytes: Vec<u8>,
    /// Packed 1-bit bitmap for the panel
    pub packed: Vec<u8>,
    /// SVG the frame was rasterized from
    pub svg: String,
    pub generated_at: DateTime<Utc>,
}

/// Template -> rasterize -> dither -> encode pipeline
pub struct RenderService {
    config: Arc<AppConfig>,
    spec: DisplaySpec,
    dither: DitherConfig,
    loader: Arc<AssetLoader>,
    templates: TemplateService,
    rasterizer: Arc<SvgRasterizer>,
}

impl RenderService {
    pub fn new(config: Arc<AppConfig>, loader: Arc<AssetLoader>) -> Result<Self, RenderError> {
        let spec = config.display_spec()?;
        let dither = config.dither_config();
        dither.validate()?;

        Ok(Self {
            rasterizer: Arc::new(SvgRasterizer::with_fonts(loader.get_fonts())),
            templates: TemplateService::new(loader.clone()),
            config,
            spec,
            dither,
            loader,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render the dashboard as of `now`.
    ///
    /// Failures reading events or rendering the template produce an error
    /// screen instead; only rasterization and encoding failures are returned.
    pub async fn render_frame(&self, now: DateTime<Utc>) -> Result<RenderedFrame, RenderError> {
        let svg = match self.compose_svg(now).await {
            Ok(svg) => svg,
            Err(e) => {
                tracing::error!(error = %e, "Dashboard composition failed, rendering error screen");
                self.templates.render_error(&e.to_string(), self.spec)
            }
        };
        self.render_in_blocking_context(svg, now).await
    }

    /// Build the dashboard SVG for `now`
    pub async fn compose_svg(&self, now: DateTime<Utc>) -> Result<String, RenderError> {
        let raw = self.loader.read_asset(&self.config.events_file).await?;
        let events = parse_events(&String::from_utf8_lossy(&raw))?;
        let events = upcoming(&events, now);
        tracing::debug!(upcoming = events.len(), "Loaded events");

        let photo = match &self.config.photo {
            Some(path) => match self.loader.read_asset(path).await {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Photo unavailable, rendering without it");
                    None
                }
            },
            None => None,
        };

        let context =
            DashboardContext::build(&self.config, self.spec, &events, now, photo.as_deref());
        Ok(self.templates.render(&context)?)
    }

    /// Execute CPU-intensive rendering in a blocking context
    async fn render_in_blocking_context(
        &self,
        svg: String,
        now: DateTime<Utc>,
    ) -> Result<RenderedFrame, RenderError> {
        let rasterizer = self.rasterizer.clone();
        let (spec, dither) = (self.spec, self.dither);

        tokio::task::spawn_blocking(move || -> Result<RenderedFrame, RenderError> {
            let start = std::time::Instant::now();
            let frame = rasterizer.render_mono(svg.as_bytes(), spec, dither)?;
            let png_bytes = encode_mask_png(&frame)?;
            let (packed, _) = frame.into_parts();
            tracing::info!(
                png_bytes = png_bytes.len(),
                packed_bytes = packed.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Rendered frame"
            );
            Ok(RenderedFrame {
                png_bytes,
                packed,
                svg,
                generated_at: now,
            })
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
    }
}
