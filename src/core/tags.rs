use std::ops::RangeInclusive;

/// Characters accepted in tags beyond letters, digits and `_`.
pub const DEFAULT_EXTENDED_RANGE: RangeInclusive<char> = '\u{0080}'..='\u{FFFF}';

/// Finds `#tag` tokens in note content.
///
/// A tag is the marker followed by one or more tag characters: Unicode
/// letters and numbers, `_`, and anything inside the extended range (which
/// by default covers the whole Basic Multilingual Plane above ASCII, so
/// Hangul, CJK and accented tags all work).
#[derive(Debug, Clone)]
pub struct TagScanner {
    marker: char,
    extended: Option<RangeInclusive<char>>,
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new('#', Some(DEFAULT_EXTENDED_RANGE))
    }
}

impl TagScanner {
    pub fn new(marker: char, extended: Option<RangeInclusive<char>>) -> Self {
        Self { marker, extended }
    }

    pub fn is_tag_char(&self, c: char) -> bool {
        c.is_alphanumeric()
            || c == '_'
            || self.extended.as_ref().is_some_and(|range| range.contains(&c))
    }

    /// Every tag in `content`, without the marker, in order of appearance.
    /// Repeated tags are returned once per occurrence.
    pub fn extract<'c>(&self, content: &'c str) -> Vec<&'c str> {
        let mut tags = Vec::new();
        let mut chars = content.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            if c != self.marker {
                continue;
            }
            let Some(&(start, _)) = chars.peek() else {
                break;
            };

            let mut end = start;
            while let Some(&(i, next)) = chars.peek() {
                if !self.is_tag_char(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }

            if end > start {
                tags.push(&content[start..end]);
            }
        }

        tags
    }
}

pub fn extract_tags(content: &str) -> Vec<String> {
    TagScanner::default()
        .extract(content)
        .into_iter()
        .map(String::from)
        .collect()
}
