//! TTY detection and color support logic

use std::io::IsTerminal;

/// Output stream a message is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Decide whether colors should be used for `stream`
///
/// NO_COLOR wins over everything, then CLICOLOR_FORCE, then CLICOLOR=0,
/// and finally whether the stream is a terminal.
pub fn should_use_colors(stream: Stream) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if val != "0" {
            return true;
        }
    }

    if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        return false;
    }

    match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_color_env() {
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("CLICOLOR_FORCE");
        std::env::remove_var("CLICOLOR");
    }

    #[test]
    #[serial]
    fn test_no_color_disables_both_streams() {
        clear_color_env();
        std::env::set_var("NO_COLOR", "1");
        assert!(!should_use_colors(Stream::Stdout));
        assert!(!should_use_colors(Stream::Stderr));
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_clicolor_force_enables_when_piped() {
        clear_color_env();
        std::env::set_var("CLICOLOR_FORCE", "1");
        assert!(should_use_colors(Stream::Stdout));
        assert!(should_use_colors(Stream::Stderr));
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_clicolor_force_zero_is_ignored() {
        clear_color_env();
        std::env::set_var("CLICOLOR_FORCE", "0");
        std::env::set_var("CLICOLOR", "0");
        assert!(!should_use_colors(Stream::Stdout));
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_no_color_overrides_force() {
        clear_color_env();
        std::env::set_var("NO_COLOR", "1");
        std::env::set_var("CLICOLOR_FORCE", "1");
        assert!(!should_use_colors(Stream::Stdout));
        clear_color_env();
    }
}
