//! Cleanup of raw assistant output
//!
//! The assistant CLI writes terminal chrome around its answers: color codes,
//! safety banners, tool-use transcripts, a help footer and retry traces.
//! None of that belongs in a report.

use regex::Regex;
use std::sync::OnceLock;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {{
        static $name: OnceLock<Regex> = OnceLock::new();
        $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
    }};
}

/// Strip ANSI escapes and assistant chrome, then drop blank lines
pub fn sanitize(raw: &str) -> String {
    let ansi = static_regex!(ANSI, r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])");
    let safety_header = static_regex!(
        SAFETY_HEADER,
        r"(?s)To learn more about MCP safety.*?━━━━━━━━━━━━━━━━━━━+\n"
    );
    let tool_use = static_regex!(
        TOOL_USE,
        r"(?s)🛠️  Using tool:.*?● Completed in \d+\.\d+s"
    );
    let help_footer = static_regex!(
        HELP_FOOTER,
        r"(?s)\n/help all commands.*• ctrl \+ k fuzzy search\n.*\n"
    );
    let trouble_trace = static_regex!(
        TROUBLE_TRACE,
        r"(?s)Amazon Q is having trouble responding right now:.*?Backtrace omitted\.?"
    );

    let text = ansi.replace_all(raw, "");
    let text = safety_header.replace_all(&text, "");
    let text = tool_use.replace_all(&text, "");
    let text = help_footer.replace_all(&text, "");
    let text = trouble_trace.replace_all(&text, "");

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
