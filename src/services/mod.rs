pub mod frame_cache;
pub mod renderer;
pub mod template_service;

pub use frame_cache::FrameCache;
pub use renderer::{RenderService, RenderedFrame};
pub use template_service::{DashboardContext, TemplateError, TemplateService};
