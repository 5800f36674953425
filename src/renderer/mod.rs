//! Report renderer module
//!
//! Wraps sanitized assistant output into the report formats written by the
//! CLI: framed text, JSON, Markdown, and standalone HTML documentation.

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

use crate::error::Result;

const RULE_WIDTH: usize = 50;

/// Output format for `analyze`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisFormat {
    Text,
    Json,
    Markdown,
}

/// Output format for `document`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocFormat {
    Markdown,
    Html,
}

impl DocFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocFormat::Markdown => "md",
            DocFormat::Html => "html",
        }
    }
}

/// JSON shape of an analysis report
#[derive(Debug, Serialize)]
struct AnalysisReport<'a> {
    path: String,
    analysis_date: String,
    results: &'a str,
}

/// Renders reports stamped with a fixed generation time
pub struct Renderer {
    generated_at: DateTime<Local>,
}

impl Renderer {
    pub fn new(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }

    fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Render an analysis in the requested format
    pub fn analysis(&self, format: AnalysisFormat, path: &Path, body: &str) -> Result<String> {
        match format {
            AnalysisFormat::Text => Ok(self.framed("CODE ANALYSIS RESULTS", path, body)),
            AnalysisFormat::Json => self.json(path, body),
            AnalysisFormat::Markdown => Ok(self.markdown("Code Analysis Results", path, body)),
        }
    }

    /// Plain text report framed by `=` rules, titled `<TITLE> FOR: <path>`
    pub fn framed(&self, title: &str, path: &Path, body: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "{} FOR: {}\n{}\n{}\n{}\n",
            title,
            path.display(),
            rule,
            body,
            rule
        )
    }

    fn json(&self, path: &Path, body: &str) -> Result<String> {
        let report = AnalysisReport {
            path: path.display().to_string(),
            analysis_date: self.timestamp(),
            results: body,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn markdown(&self, title: &str, path: &Path, body: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", title));
        output.push_str(&format!("**Path:** `{}`  \n", path.display()));
        output.push_str(&format!("**Date:** {}\n\n", self.timestamp()));
        output.push_str(&format!("## Results\n\n{}\n", body));
        output
    }

    /// Render generated documentation for the file named `name`
    pub fn documentation(&self, format: DocFormat, name: &str, body: &str) -> String {
        match format {
            DocFormat::Markdown => format!("# Documentation for {}\n\n{}\n", name, body),
            DocFormat::Html => documentation_html(name, body),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert the markdown subset the assistant emits: headings, fences, paragraphs
fn markdown_to_html(body: &str) -> String {
    let mut html = String::new();
    let mut in_code = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            html.push_str(if in_code {
                "</code></pre>\n"
            } else {
                "<pre><code>"
            });
            in_code = !in_code;
            continue;
        }

        if in_code {
            html.push_str(&escape_html(line));
            html.push('\n');
            continue;
        }

        let hashes = line.chars().take_while(|&c| c == '#').count();
        if hashes > 0 && line[hashes..].starts_with(' ') {
            // h1 is the page title
            let level = (hashes + 1).min(6);
            html.push_str(&format!(
                "<h{level}>{}</h{level}>\n",
                escape_html(line[hashes..].trim())
            ));
        } else if !line.trim().is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape_html(line)));
        }
    }

    if in_code {
        html.push_str("</code></pre>\n");
    }

    html
}

fn documentation_html(name: &str, body: &str) -> String {
    let title = escape_html(name);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Documentation for {title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; margin: 0 auto; max-width: 900px; padding: 20px; }}
        h1, h2, h3 {{ color: #333; }}
        code {{ background-color: #f4f4f4; padding: 2px 5px; border-radius: 3px; }}
        pre {{ background-color: #f4f4f4; padding: 10px; border-radius: 5px; overflow-x: auto; }}
    </style>
</head>
<body>
    <h1>Documentation for {title}</h1>
    <div class="content">
{content}    </div>
</body>
</html>
"#,
        title = title,
        content = markdown_to_html(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn renderer() -> Renderer {
        Renderer::new(Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap())
    }

    #[test]
    fn test_framed_text_report() {
        let out = renderer().framed("REFACTORING SUGGESTIONS", Path::new("app.py"), "Split main()");
        let rule = "=".repeat(50);
        assert_eq!(
            out,
            format!("REFACTORING SUGGESTIONS FOR: app.py\n{rule}\nSplit main()\n{rule}\n")
        );
    }

    #[test]
    fn test_analysis_text_title() {
        let out = renderer()
            .analysis(AnalysisFormat::Text, Path::new("src"), "Fine")
            .unwrap();
        assert!(out.starts_with("CODE ANALYSIS RESULTS FOR: src\n"));
    }

    #[test]
    fn test_analysis_json_fields() {
        let out = renderer()
            .analysis(AnalysisFormat::Json, Path::new("calc.py"), "Too many globals")
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["path"], "calc.py");
        assert_eq!(value["analysis_date"], "2024-03-09 14:05:00");
        assert_eq!(value["results"], "Too many globals");
    }

    #[test]
    fn test_analysis_markdown_layout() {
        let out = renderer()
            .analysis(AnalysisFormat::Markdown, Path::new("calc.py"), "- globals")
            .unwrap();

        assert!(out.starts_with("# Code Analysis Results\n\n"));
        assert!(out.contains("**Path:** `calc.py`"));
        assert!(out.contains("**Date:** 2024-03-09 14:05:00"));
        assert!(out.ends_with("## Results\n\n- globals\n"));
    }

    #[test]
    fn test_documentation_markdown() {
        let out = renderer().documentation(DocFormat::Markdown, "calc.py", "## add\nAdds.");
        assert_eq!(out, "# Documentation for calc.py\n\n## add\nAdds.\n");
    }

    #[test]
    fn test_documentation_html_escapes_and_structures() {
        let body = "# Overview\nCompares a < b & more\n```\nif a < b:\n    pass\n```";
        let out = renderer().documentation(DocFormat::Html, "calc.py", body);

        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<title>Documentation for calc.py</title>"));
        assert!(out.contains("<h2>Overview</h2>"));
        assert!(out.contains("<p>Compares a &lt; b &amp; more</p>"));
        assert!(out.contains("<pre><code>if a &lt; b:\n    pass\n</code></pre>"));
    }

    #[test]
    fn test_unterminated_fence_is_closed() {
        let html = markdown_to_html("```\nprint(1)");
        assert_eq!(html, "<pre><code>print(1)\n</code></pre>\n");
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        let html = markdown_to_html("#include <stdio.h>");
        assert_eq!(html, "<p>#include &lt;stdio.h&gt;</p>\n");
    }

    #[test]
    fn test_doc_format_extension() {
        assert_eq!(DocFormat::Markdown.extension(), "md");
        assert_eq!(DocFormat::Html.extension(), "html");
    }
}
