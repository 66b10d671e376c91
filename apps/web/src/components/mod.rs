//! UI Components

mod result_panel;
mod sketch_pad;
mod toolbar;

pub use result_panel::ResultPanel;
pub use sketch_pad::SketchPad;
pub use toolbar::{parse_width, Toolbar};
