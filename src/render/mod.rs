//! Output of finished area trees.

mod json;
mod options;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::{PageSelection, RenderOptions};
pub use result::LayoutStats;
pub use text::to_text;
