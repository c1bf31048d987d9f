use regex::{Regex, RegexBuilder};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Plain(String),
    Emphasized(String),
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Plain(text) | Fragment::Emphasized(text) => text,
        }
    }
}

/// Splits display strings around case-insensitive occurrences of the search term. The term
/// is matched literally.
///
/// Matching uses Unicode simple case folding, while the node filter compares `to_lowercase`
/// output, so a few characters with several case forms (final sigma `ς` against `Σ`) can be
/// emphasized inside a node the filter did not keep.
#[derive(Clone, Debug)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(term: &str) -> Self {
        if term.is_empty() {
            return Self { pattern: None };
        }
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .ok();
        Self { pattern }
    }

    pub fn highlight(&self, text: &str) -> Vec<Fragment> {
        if text.is_empty() {
            return Vec::new();
        }
        let Some(pattern) = &self.pattern else {
            return vec![Fragment::Plain(text.to_string())];
        };

        let mut fragments = Vec::new();
        let mut cursor = 0usize;
        for found in pattern.find_iter(text) {
            if found.start() > cursor {
                fragments.push(Fragment::Plain(text[cursor..found.start()].to_string()));
            }
            fragments.push(Fragment::Emphasized(found.as_str().to_string()));
            cursor = found.end();
        }
        if cursor < text.len() {
            fragments.push(Fragment::Plain(text[cursor..].to_string()));
        }
        fragments
    }
}
