//! Colored status lines and section banners

use termimad::crossterm::style::{StyledContent, Stylize};

use crate::display::terminal::{should_use_colors, Stream};

/// Kind of status message, which decides color and stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Progress,
    Success,
    Warning,
    Failure,
    Banner,
}

impl Tone {
    fn stream(self) -> Stream {
        match self {
            Tone::Warning | Tone::Failure => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    fn paint(self, text: &str) -> StyledContent<&str> {
        match self {
            Tone::Header => text.magenta(),
            Tone::Progress => text.yellow(),
            Tone::Success => text.green(),
            Tone::Warning => text.yellow(),
            Tone::Failure => text.red(),
            Tone::Banner => text.blue().bold(),
        }
    }
}

/// Format `text` for `tone`, with ANSI styling only when `colored`
pub fn styled(tone: Tone, text: &str, colored: bool) -> String {
    if colored {
        tone.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn emit(tone: Tone, text: &str) {
    let stream = tone.stream();
    let line = styled(tone, text, should_use_colors(stream));
    match stream {
        Stream::Stdout => println!("{}", line),
        Stream::Stderr => eprintln!("{}", line),
    }
}

pub fn header(text: &str) {
    emit(Tone::Header, text);
}

pub fn progress(text: &str) {
    emit(Tone::Progress, text);
}

pub fn success(text: &str) {
    emit(Tone::Success, text);
}

pub fn warning(text: &str) {
    emit(Tone::Warning, text);
}

pub fn failure(text: &str) {
    emit(Tone::Failure, text);
}

/// Print a framed section banner, as used between demo steps
pub fn banner(title: &str) {
    let rule = "=".repeat(title.chars().count().max(40));
    println!();
    emit(Tone::Banner, &rule);
    emit(Tone::Banner, title);
    emit(Tone::Banner, &rule);
}
