//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, PathsOutput};
pub use text::TextFormatter;
