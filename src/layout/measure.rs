//! Text measurement and greedy word-wrap.

use tracing::warn;

/// Measures the advance width of a text run.
pub trait TextMeasure {
    /// Width in points of `text` set at `size` points.
    fn width(&self, text: &str, size: f32) -> f32;
}

/// Approximates every glyph as `factor × size` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageGlyph {
    pub factor: f32,
}

impl AverageGlyph {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }
}

impl TextMeasure for AverageGlyph {
    fn width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.factor
    }
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Greedy: each word is appended to the current line (with one space) while
/// the measured result still fits, otherwise the line is flushed and the word
/// starts a new one. A single word wider than `max_width` is emitted on its
/// own line unchanged and will exceed the width.
///
/// # Examples
///
/// ```
/// use office_energy_report::layout::measure::{AverageGlyph, wrap_text};
///
/// // 1 pt per character
/// let m = AverageGlyph::new(0.5);
/// let lines = wrap_text("aa bb cc", 5.0, 2.0, &m);
/// assert_eq!(lines, vec!["aa bb", "cc"]);
/// ```
pub fn wrap_text(text: &str, max_width: f32, size: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure.width(word, size) > max_width {
            warn!(word, max_width, "word wider than available width");
        }
        current = word.to_string();
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One point per character at size 2.
    fn unit() -> AverageGlyph {
        AverageGlyph::new(0.5)
    }

    #[test]
    fn short_text_single_line() {
        assert_eq!(wrap_text("hello world", 100.0, 2.0, &unit()), vec!["hello world"]);
    }

    #[test]
    fn exact_fit_stays_on_line() {
        // "abc de" is 6 wide
        assert_eq!(wrap_text("abc de", 6.0, 2.0, &unit()), vec!["abc de"]);
        assert_eq!(wrap_text("abc de", 5.9, 2.0, &unit()), vec!["abc", "de"]);
    }

    #[test]
    fn no_line_exceeds_width() {
        let text = "the quick brown fox jumps over the lazy dog and keeps running far away";
        let m = unit();
        let lines = wrap_text(text, 17.0, 2.0, &m);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| m.width(l, 2.0) <= 17.0));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn overlong_word_gets_own_line_untruncated() {
        let lines = wrap_text("a supercalifragilistic b", 8.0, 2.0, &unit());
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_and_blank_text_give_no_lines() {
        assert!(wrap_text("", 50.0, 2.0, &unit()).is_empty());
        assert!(wrap_text("   ", 50.0, 2.0, &unit()).is_empty());
    }

    #[test]
    fn repeated_spaces_collapse() {
        assert_eq!(wrap_text("a   b", 50.0, 2.0, &unit()), vec!["a b"]);
    }
}
