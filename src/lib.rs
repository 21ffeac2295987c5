//! inkdash - countdown dashboard for monochrome e-paper panels
//!
//! Renders an SVG dashboard, dithers it to 1 bit per pixel and serves the
//! result as a packed bitmap for the panel and a PNG preview.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
