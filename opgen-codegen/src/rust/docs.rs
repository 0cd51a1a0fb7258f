//! Documentation comment rendering.
//!
//! Operation documentation is free-form text with markdown-ish fences and
//! inline backticks. It is escaped for HTML and rewritten with explicit
//! markers so rustdoc renders entities inside code spans correctly.

/// Markers substituted for fences and backticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentMarkers {
    /// Opens a code block.
    pub block_open: &'static str,
    /// Closes a code block.
    pub block_close: &'static str,
    /// Opens an inline code span.
    pub inline_open: &'static str,
    /// Closes an inline code span.
    pub inline_close: &'static str,
}

impl CommentMarkers {
    /// HTML markers understood by rustdoc.
    pub const RUSTDOC: Self = Self {
        block_open: "<pre>",
        block_close: "</pre>",
        inline_open: "<code>",
        inline_close: "</code>",
    };
}

impl Default for CommentMarkers {
    fn default() -> Self {
        Self::RUSTDOC
    }
}

const FENCE: &str = "```";

/// Language hints that are dropped together with their fence.
const LANGUAGE_HINTS: &[&str] = &["python", "c++"];

/// Renders documentation text into comment lines (without the `///` prefix).
///
/// Lines are trimmed and HTML-escaped. Fenced blocks become block markers
/// and backticks become inline markers. Unbalanced input never fails; the
/// last toggle wins.
#[must_use]
pub fn render_comment(text: &str, markers: &CommentMarkers) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut block_open_next = true;

    for raw in text.split('\n') {
        let line = escape_html(raw.trim());

        let Some(rest) = line.strip_prefix(FENCE) else {
            lines.push(inline_code(&line, markers));
            continue;
        };

        lines.push(block_marker(&mut block_open_next, markers).to_string());

        if rest.is_empty() || LANGUAGE_HINTS.contains(&rest) {
            continue;
        }

        match rest.strip_suffix(FENCE) {
            Some(inner) => {
                lines.push(inline_code(inner, markers));
                lines.push(block_marker(&mut block_open_next, markers).to_string());
            }
            None => lines.push(inline_code(rest, markers)),
        }
    }

    lines
}

fn block_marker(open_next: &mut bool, markers: &CommentMarkers) -> &'static str {
    let marker = if *open_next {
        markers.block_open
    } else {
        markers.block_close
    };
    *open_next = !*open_next;
    marker
}

/// Replaces backticks with alternating inline markers.
///
/// The open/closed state starts closed on every line.
fn inline_code(line: &str, markers: &CommentMarkers) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut open = false;

    for c in line.chars() {
        if c == '`' {
            out.push_str(if open {
                markers.inline_close
            } else {
                markers.inline_open
            });
            open = !open;
        } else {
            out.push(c);
        }
    }

    out
}

/// Escapes `<`, `>` and `&` in a single pass.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}
