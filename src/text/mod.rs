//! # Text Layout
//!
//! Line breaking and truncation on top of [`FontContext`] measurement.
//!
//! All wrapping here is greedy: tokens are appended to the current line one
//! at a time, and the line is closed as soon as the next token would push it
//! past the maximum width. A token that is wider than the maximum on its own
//! gets a line to itself; we never split inside a word.

use crate::font::FontContext;
use crate::style::TextStyle;

const LIST_SEPARATOR: &str = ", ";

pub struct TextLayout<'a> {
    fonts: &'a FontContext,
}

impl<'a> TextLayout<'a> {
    pub fn new(fonts: &'a FontContext) -> Self {
        Self { fonts }
    }

    pub fn measure(&self, text: &str, style: &TextStyle) -> f64 {
        self.fonts.measure(text, style)
    }

    /// Break `text` into lines no wider than `max_width`, splitting on
    /// whitespace. Runs of whitespace collapse to a single space.
    ///
    /// Returns an empty vec for blank input.
    pub fn wrap_words(&self, text: &str, style: &TextStyle, max_width: f64) -> Vec<String> {
        pack_greedy(text.split_whitespace(), " ", |candidate| {
            self.measure(candidate, style) <= max_width
        })
    }

    /// Break a list of items joined by `", "` into lines no wider than
    /// `max_width`. Every line except the last ends with a comma, and that
    /// comma is counted when deciding whether an item still fits. Whitespace
    /// inside an item collapses to single spaces.
    pub fn wrap_list<S: AsRef<str>>(
        &self,
        items: &[S],
        style: &TextStyle,
        max_width: f64,
    ) -> Vec<String> {
        let items = collapse_items(items);
        let mut probe = String::new();
        let mut lines = pack_greedy(
            items.iter().map(String::as_str),
            LIST_SEPARATOR,
            |candidate| {
                probe.clear();
                probe.push_str(candidate);
                probe.push(',');
                self.measure(&probe, style) <= max_width
            },
        );
        let last = lines.len().saturating_sub(1);
        for line in lines.iter_mut().take(last) {
            line.push(',');
        }
        lines
    }

    /// Pack whole items joined by `separator` into lines no wider than
    /// `max_width`. An item too wide for a line of its own is word-wrapped.
    pub fn wrap_joined<S: AsRef<str>>(
        &self,
        items: &[S],
        separator: &str,
        style: &TextStyle,
        max_width: f64,
    ) -> Vec<String> {
        let items = collapse_items(items);
        pack_greedy(
            items.iter().map(String::as_str),
            separator,
            |candidate| self.measure(candidate, style) <= max_width,
        )
        .into_iter()
        .flat_map(|line| {
            if self.measure(&line, style) > max_width {
                self.wrap_words(&line, style, max_width)
            } else {
                vec![line]
            }
        })
        .collect()
    }
}

/// Greedy packing of `tokens` joined by `joiner`.
///
/// `fits` is asked about the current line extended by the next token. A
/// token that does not fit on an empty line is placed alone.
fn pack_greedy<'t, I, F>(tokens: I, joiner: &str, mut fits: F) -> Vec<String>
where
    I: IntoIterator<Item = &'t str>,
    F: FnMut(&str) -> bool,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in tokens {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }

        let checkpoint = current.len();
        current.push_str(joiner);
        current.push_str(token);
        if !fits(&current) {
            current.truncate(checkpoint);
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Collapse every run of whitespace (tabs and newlines included) to a
/// single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapse_items<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| collapse_whitespace(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Keep at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
