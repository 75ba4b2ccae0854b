//! Line-level tokenization: comment stripping, whitespace splitting, and the
//! column-0 rule from spec.md §6 ("a non-space first character means label
//! or directive; a leading space means instruction or continuation").

#[derive(Clone, Debug)]
pub struct Line {
    pub raw: String,
    pub tokens: Vec<String>,
    pub col0: bool,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Strips a trailing `#`/`//` comment, but never at index 0: a column-0 `#`
/// is a preprocessor directive (`#define`, `#if`, ...), not a comment marker
/// (spec.md §6's column rule reserves column 0 for labels/directives), so a
/// directive line is returned untouched here and only a later, genuine
/// comment on the same line gets stripped.
fn strip_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if i > 0 && bytes[i] == b'#' {
            return &raw[..i];
        }
        if i > 0 && bytes[i] == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
            return &raw[..i];
        }
        i += 1;
    }
    raw
}

pub fn tokenize(raw: &str) -> Line {
    let code = strip_comment(raw);
    let col0 = raw
        .chars()
        .next()
        .map_or(false, |c| !c.is_whitespace());
    let tokens = code.split_whitespace().map(|t| t.to_string()).collect();
    Line {
        raw: raw.to_string(),
        tokens,
        col0,
    }
}
