pub mod config;
pub mod display_spec;
pub mod event;

pub use config::{AppConfig, DisplayConfig, DitherSettings};
pub use display_spec::DisplaySpec;
pub use event::{days_until, parse_events, upcoming, Countdown, Event, EventError};
