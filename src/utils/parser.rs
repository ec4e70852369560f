//! Text extraction primitives.

use regex::Regex;

/// Extract first match from content using regex pattern with capture group.
/// Pattern must contain exactly one capture group for the value to extract.
/// Content is trimmed before matching.
pub fn extract_first(content: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(content.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
