//! Plain-text view of a rendered document and find-next/find-previous.
//!
//! Search runs over the text a reader sees, not over the markup, so a query
//! never matches inside a tag or an entity. Matching is case-insensitive and
//! wraps around: searching forward past the last match continues from the
//! top, searching backward past the first continues from the bottom.
//!
//! Positions are character offsets into [`plain_text`] output.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|<hr\s*/?>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Derives the displayed text of rendered HTML.
///
/// Source whitespace collapses to single spaces as a browser would show it.
/// `<br>`, `</p>` and `<hr>` end a line, other tags are dropped, common
/// entities are decoded, and blank lines are removed.
///
/// # Example
///
/// ```
/// use chatview::viewer::plain_text;
///
/// let html = "<p>\n    <b>ana</b> [now]:\n    <br>\n    1 &lt; 2\n</p>\n<hr>\n";
/// assert_eq!(plain_text(html), "ana [now]:\n1 < 2");
/// ```
pub fn plain_text(html: &str) -> String {
    let collapsed = WHITESPACE.replace_all(html, " ");
    let broken = BREAK_TAG.replace_all(&collapsed, "\n");
    let stripped = ANY_TAG.replace_all(&broken, "");

    let lines: Vec<&str> = stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    decode_entities(&lines.join("\n"))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// A half-open range of character offsets. Empty when `start == end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection (a caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Result of one search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Found a match in the search direction.
    Found(Selection),
    /// Found a match only after wrapping around the document.
    Wrapped(Selection),
    /// The document does not contain the query.
    NoMatches,
    /// The query was empty; nothing changed.
    EmptyQuery,
}

impl SearchOutcome {
    /// The new selection, if the search matched.
    pub fn selection(&self) -> Option<Selection> {
        match self {
            Self::Found(sel) | Self::Wrapped(sel) => Some(*sel),
            Self::NoMatches | Self::EmptyQuery => None,
        }
    }
}

/// Searchable plain text with a current selection.
#[derive(Debug, Clone, Default)]
pub struct TextSearch {
    chars: Vec<char>,
    folded: Vec<char>,
    selection: Selection,
}

impl TextSearch {
    /// Builds the search view of rendered HTML.
    pub fn from_html(html: &str) -> Self {
        Self::from_text(&plain_text(html))
    }

    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let folded = chars.iter().map(|&c| fold(c)).collect();
        Self {
            chars,
            folded,
            selection: Selection::default(),
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The currently selected text.
    pub fn selected_text(&self) -> String {
        self.chars[self.selection.start..self.selection.end]
            .iter()
            .collect()
    }

    /// Moves the selection to the next match after the current selection.
    pub fn find_next(&mut self, query: &str) -> SearchOutcome {
        let Some(needle) = self.needle(query) else {
            return SearchOutcome::EmptyQuery;
        };

        let outcome = match self.match_from(&needle, self.selection.end) {
            Some(start) => SearchOutcome::Found(Selection::new(start, start + needle.len())),
            None => match self.match_from(&needle, 0) {
                Some(start) => SearchOutcome::Wrapped(Selection::new(start, start + needle.len())),
                None => SearchOutcome::NoMatches,
            },
        };
        self.apply(outcome)
    }

    /// Moves the selection to the closest match before the current selection.
    pub fn find_previous(&mut self, query: &str) -> SearchOutcome {
        let Some(needle) = self.needle(query) else {
            return SearchOutcome::EmptyQuery;
        };

        let outcome = match self.match_before(&needle, self.selection.start) {
            Some(start) => SearchOutcome::Found(Selection::new(start, start + needle.len())),
            None => match self.match_before(&needle, self.chars.len()) {
                Some(start) => SearchOutcome::Wrapped(Selection::new(start, start + needle.len())),
                None => SearchOutcome::NoMatches,
            },
        };
        self.apply(outcome)
    }

    /// Collapses the selection to a caret at its start.
    pub fn clear(&mut self) {
        self.selection = Selection::caret(self.selection.start);
    }

    /// Number of non-overlapping matches of `query`.
    pub fn count(&self, query: &str) -> usize {
        let Some(needle) = self.needle(query) else {
            return 0;
        };
        let mut count = 0;
        let mut from = 0;
        while let Some(start) = self.match_from(&needle, from) {
            count += 1;
            from = start + needle.len();
        }
        count
    }

    fn needle(&self, query: &str) -> Option<Vec<char>> {
        if query.is_empty() {
            return None;
        }
        Some(query.chars().map(fold).collect())
    }

    fn apply(&mut self, outcome: SearchOutcome) -> SearchOutcome {
        if let Some(selection) = outcome.selection() {
            self.selection = selection;
        }
        outcome
    }

    /// First match starting at or after `from`.
    fn match_from(&self, needle: &[char], from: usize) -> Option<usize> {
        let last = self.folded.len().checked_sub(needle.len())?;
        (from..=last).find(|&i| self.folded[i..i + needle.len()] == *needle)
    }

    /// Last match ending at or before `until`.
    fn match_before(&self, needle: &[char], until: usize) -> Option<usize> {
        let last = until.min(self.folded.len()).checked_sub(needle.len())?;
        (0..=last)
            .rev()
            .find(|&i| self.folded[i..i + needle.len()] == *needle)
    }
}

/// One-to-one case folding, so offsets in folded text match the original.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
