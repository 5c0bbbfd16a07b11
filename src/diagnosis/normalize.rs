use std::sync::LazyLock;

use regex::Regex;

// Emphasis, heading and code-fence/backtick markers. Generative models
// decorate their answers with these even when asked for plain text.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`#]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Flatten a captured span of analysis text into a single markup-free line.
///
/// Strips markdown emphasis, heading and backtick markers, collapses all
/// whitespace runs (including newlines) into single spaces and trims the
/// ends. Total over any input, including the empty string, and idempotent.
pub fn normalize(span: &str) -> String {
    let stripped = MARKUP.replace_all(span, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
