use regex::{Regex, RegexBuilder};

/// Characters of context kept on each side of a match.
pub const SNIPPET_CONTEXT_CHARS: usize = 50;

/// Case-insensitive literal matcher that cuts a context window around the
/// first hit.
#[derive(Debug, Clone)]
pub struct SnippetFinder {
    re: Regex,
    context_chars: usize,
}

impl SnippetFinder {
    pub fn new(query: &str) -> Result<Self, regex::Error> {
        Self::with_context(query, SNIPPET_CONTEXT_CHARS)
    }

    pub fn with_context(query: &str, context_chars: usize) -> Result<Self, regex::Error> {
        let re = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()?;
        Ok(Self { re, context_chars })
    }

    /// `...context...` around the first match, newlines flattened to spaces.
    pub fn find(&self, content: &str) -> Option<String> {
        let mat = self.re.find(content)?;
        let context = extract_context(content, mat.start(), mat.end(), self.context_chars);
        Some(format!("...{}...", context.replace('\n', " ")))
    }
}

/// Text from `context_chars` characters before `match_start` to
/// `context_chars` characters after `match_end`, clipped to the content.
/// Offsets are byte positions; the window is counted in characters.
fn extract_context(
    content: &str,
    match_start: usize,
    match_end: usize,
    context_chars: usize,
) -> String {
    let char_start = content[..match_start].chars().count();
    let char_end = char_start + content[match_start..match_end].chars().count();
    let total = char_start + content[match_start..].chars().count();

    let start = char_start.saturating_sub(context_chars);
    let end = (char_end + context_chars).min(total);

    content.chars().skip(start).take(end - start).collect()
}
