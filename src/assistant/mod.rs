//! External assistant module
//!
//! Runs the assistant CLI as a subprocess with the prompt on stdin and
//! cleans its terminal output into report text.

mod runner;
mod sanitize;

pub use runner::Runner;
