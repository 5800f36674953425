//! Markdown terminal formatting using termimad

use termimad::{gray, MadSkin};

use crate::display::terminal::{should_use_colors, Stream};

/// Print an assistant report to the terminal, styled when colors are allowed
pub fn print_markdown(markdown: &str) {
    if should_use_colors(Stream::Stdout) {
        skin().print_text(markdown);
    } else {
        println!("{}", markdown);
    }
}

/// Build the skin used for reports
fn skin() -> MadSkin {
    use termimad::crossterm::style::{Attribute, Color::*};

    let mut skin = MadSkin::default();

    skin.headers[0].set_fg(Magenta);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Yellow);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.headers[2].set_fg(Yellow);

    // Suggested code stands out from prose
    skin.code_block.set_bg(gray(2));
    skin.code_block.set_fg(Green);
    skin.inline_code.set_fg(Cyan);

    skin.bold.add_attr(Attribute::Bold);
    skin.italic.add_attr(Attribute::Italic);
    skin.bullet.set_fg(Yellow);

    skin
}
