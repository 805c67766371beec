//! Inline markup of assertion text
//!
//! Assertion and group text may carry a small inline markup:
//!
//! - `_text_` highlights a term
//! - `~text~` marks deleted wording
//! - `|text|` marks a literal (code, names)
//!
//! [`Markup::parse`] splits text into typed fragments so any renderer can
//! style them; [`Markup::plain`] drops the markers.

use regex::Regex;

/// How a fragment of text is marked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Unmarked text
    Plain,
    /// `_highlighted_`
    Highlight,
    /// `~deleted~`
    Deleted,
    /// `|literal|`
    Literal,
}

/// A run of text with a single markup kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Markup kind
    pub kind: FragmentKind,
    /// Text without markers
    pub text: String,
}

impl Fragment {
    fn new(kind: FragmentKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Compiled markup scanner
#[derive(Debug, Clone)]
pub struct Markup {
    pattern: Regex,
}

impl Markup {
    /// Compile the markup pattern
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(r"_([^_]*)_|~([^~]*)~|\|([^|]*)\|")?,
        })
    }

    /// Split text into fragments, left to right
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                fragments.push(Fragment::new(FragmentKind::Plain, &text[last..whole.start()]));
            }

            let marked = [
                (1, FragmentKind::Highlight),
                (2, FragmentKind::Deleted),
                (3, FragmentKind::Literal),
            ]
            .into_iter()
            .find_map(|(group, kind)| caps.get(group).map(|m| Fragment::new(kind, m.as_str())));
            if let Some(fragment) = marked {
                fragments.push(fragment);
            }
            last = whole.end();
        }

        if last < text.len() {
            fragments.push(Fragment::new(FragmentKind::Plain, &text[last..]));
        }
        fragments
    }

    /// Text with all markers removed
    #[must_use]
    pub fn plain(&self, text: &str) -> String {
        self.parse(text).into_iter().map(|f| f.text).collect()
    }
}
