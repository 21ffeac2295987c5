pub mod dashboard;
pub mod photo;

pub use dashboard::{__path_handle_png, __path_handle_raw, __path_handle_svg};
pub use dashboard::{current_frame, handle_png, handle_raw, handle_svg};
pub use photo::{handle_photo, is_photo_name, __path_handle_photo};
