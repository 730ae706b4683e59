//! Label wrapping and text extent estimation.
//!
//! Extents are estimated from character counts so layout stays independent
//! of installed fonts and therefore deterministic.

/// Average glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Baseline-to-baseline distance as a fraction of the font size.
pub const LINE_HEIGHT_RATIO: f32 = 1.25;

/// Inner box padding as a fraction of the font size.
pub const PADDING_RATIO: f32 = 0.6;

/// Wrap `text` into lines of at most `width` characters.
///
/// Breaks on whitespace; a single word longer than `width` is split hard.
/// Always returns at least one line.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Estimated width of a single line.
pub fn line_width(line: &str, font_size: f32) -> f32 {
    line.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
}

/// Box size `(width, height)` that fits the wrapped lines plus padding.
pub fn box_size(lines: &[String], font_size: f32) -> (f32, f32) {
    let padding = font_size * PADDING_RATIO;
    let widest = lines
        .iter()
        .map(|l| line_width(l, font_size))
        .fold(0.0_f32, f32::max);
    let height = lines.len().max(1) as f32 * font_size * LINE_HEIGHT_RATIO;
    (widest + 2.0 * padding, height + 2.0 * padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Root", 24, vec!["Root"])]
    #[case(
        "Secure clinical communication program",
        16,
        vec!["Secure clinical", "communication", "program"]
    )]
    #[case("", 10, vec![""])]
    #[case("abcdefghij", 4, vec!["abcd", "efgh", "ij"])]
    #[case("a abcdefgh b", 4, vec!["a", "abcd", "efgh", "b"])]
    fn given_label_when_wrapping_then_splits_on_words(
        #[case] text: &str,
        #[case] width: usize,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(wrap_label(text, width), expected);
    }

    #[test]
    fn given_long_label_when_wrapping_then_no_line_exceeds_width() {
        let text = "Stakeholder alignment and regulatory readiness assessment for interoperability";
        for line in wrap_label(text, 12) {
            assert!(line.chars().count() <= 12, "line too long: {line}");
        }
    }

    #[test]
    fn given_more_lines_when_sizing_then_box_grows() {
        let one = box_size(&["abc".to_string()], 10.0);
        let two = box_size(&["abc".to_string(), "abcdef".to_string()], 10.0);
        assert!(two.0 > one.0);
        assert!(two.1 > one.1);
    }
}
