use crate::assets::{AssetLoader, TEMPLATE_FILE};
use crate::models::{AppConfig, Countdown, DisplaySpec, Event};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera};

const COLUMNS: u32 = 3;
const ROW_HEIGHT: u32 = 112;
const GRID_TOP: u32 = 24;
const SLOT_HEIGHT: u32 = 110;

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// Countdown placed on the right-hand grid
#[derive(Debug, Clone, Serialize)]
pub struct CountdownSlot {
    #[serde(flatten)]
    pub countdown: Countdown,
    pub x: u32,
    pub y: u32,
}

/// Everything the dashboard template can reference
#[derive(Debug, Clone, Serialize)]
pub struct DashboardContext {
    pub width: u32,
    pub height: u32,
    pub half_width: u32,
    pub banner_x: u32,
    pub banner_y: u32,
    pub updated_x: u32,
    pub date_banner: String,
    pub updated_at: String,
    pub countdowns: Vec<CountdownSlot>,
    pub photo: Option<String>,
    pub photo_offset_x: i32,
}

impl DashboardContext {
    /// Build the context for one frame.
    ///
    /// `events` must already be filtered to upcoming ones; countdowns that do
    /// not fit on the grid are dropped.
    pub fn build(
        config: &AppConfig,
        spec: DisplaySpec,
        events: &[Event],
        now: DateTime<Utc>,
        photo: Option<&[u8]>,
    ) -> Self {
        let local = now.with_timezone(&config.utc_offset());
        let half_width = spec.width / 2;
        let column_width = (spec.width - half_width) / COLUMNS;

        let countdowns: Vec<CountdownSlot> = events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let (row, col) = (i as u32 / COLUMNS, i as u32 % COLUMNS);
                CountdownSlot {
                    countdown: Countdown::new(event, now),
                    x: half_width + column_width * col + column_width / 2,
                    y: GRID_TOP + ROW_HEIGHT * row,
                }
            })
            .take_while(|slot| slot.y + SLOT_HEIGHT <= spec.height)
            .collect();

        if countdowns.len() < events.len() {
            tracing::debug!(
                shown = countdowns.len(),
                hidden = events.len() - countdowns.len(),
                "Not all countdowns fit on the display"
            );
        }

        Self {
            width: spec.width,
            height: spec.height,
            half_width,
            banner_x: half_width / 2,
            banner_y: spec.height.saturating_sub(40),
            updated_x: spec.width.saturating_sub(4),
            date_banner: local.format("%a %d %b").to_string().to_uppercase(),
            updated_at: local.format("%H:%M").to_string(),
            countdowns,
            photo: photo.map(photo_data_uri),
            photo_offset_x: config.photo_offset_x,
        }
    }
}

/// Encode image bytes as a data URI usvg can load
fn photo_data_uri(data: &[u8]) -> String {
    let mime = if data.starts_with(b"\x89PNG") {
        "image/png"
    } else {
        "image/jpeg"
    };
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

/// Service for rendering the dashboard SVG template with Tera
pub struct TemplateService {
    loader: Arc<AssetLoader>,
}

impl TemplateService {
    pub fn new(loader: Arc<AssetLoader>) -> Self {
        tracing::info!(
            override_template = loader.has_template_override(),
            "Template service initialized"
        );
        Self { loader }
    }

    /// Register custom Tera filters
    fn register_filters(tera: &mut Tera) {
        // truncate to a number of characters, marking the cut with "..."
        tera.register_filter(
            "truncate",
            |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                let s = tera::try_get_value!("truncate", "value", String, value);
                let len = args.get("length").and_then(|v| v.as_u64()).unwrap_or(50) as usize;

                if s.chars().count() <= len {
                    Ok(tera::Value::String(s))
                } else {
                    let truncated =
                        s.chars().take(len.saturating_sub(3)).collect::<String>() + "...";
                    Ok(tera::Value::String(truncated))
                }
            },
        );

        tera.register_filter(
            "xml_escape",
            |value: &tera::Value, _: &HashMap<String, tera::Value>| {
                let s = tera::try_get_value!("xml_escape", "value", String, value);
                Ok(tera::Value::String(xml_escape(&s)))
            },
        );
    }

    /// Render the dashboard template.
    /// The template is read on every call so an override can be edited live.
    pub fn render(&self, data: &DashboardContext) -> Result<String, TemplateError> {
        let template_content = self.loader.read_template()?;

        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_FILE, &template_content)?;
        Self::register_filters(&mut tera);

        let context = Context::from_serialize(data)?;
        let svg = tera.render(TEMPLATE_FILE, &context)?;

        Ok(svg)
    }

    /// Render an error screen
    pub fn render_error(&self, error: &str, spec: DisplaySpec) -> String {
        let (w, h) = (spec.width, spec.height);
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
  <rect width="{w}" height="{h}" fill="white"/>
  <rect x="0" y="0" width="{w}" height="70" fill="black"/>
  <text x="{cx}" y="45" text-anchor="middle" fill="white" font-family="sans-serif" font-size="28" font-weight="bold">
    Error
  </text>
  <text x="{cx}" y="{msg_y}" text-anchor="middle" fill="black" font-family="monospace" font-size="14">
    {message}
  </text>
  <text x="{cx}" y="{hint_y}" text-anchor="middle" fill="black" font-family="sans-serif" font-size="12">
    Check server logs for details
  </text>
</svg>"#,
            cx = w / 2,
            msg_y = h / 2,
            hint_y = h / 2 + 40,
            message = xml_escape(error)
        )
    }
}

/// Escape text for use inside SVG markup
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
