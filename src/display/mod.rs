//! Terminal display module
//!
//! Colored status messages, demo banners, and markdown rendering with
//! automatic TTY detection.

mod formatter;
pub mod status;
mod terminal;

pub use formatter::print_markdown;
pub use terminal::{should_use_colors, Stream};
