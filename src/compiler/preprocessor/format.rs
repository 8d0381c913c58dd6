/**
 * Fixed/free reference format handling.
 *
 * The normalizer rewrites one logical line into a same-length char buffer
 * with the layout noise removed, so the lexer never has to know which
 * reference format the file uses.
 */
use serde::Serialize;

/// The reference format of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub(crate) enum SourceFormat {
    /// Not yet decided; normalizes as Fixed until detection settles it.
    #[default]
    Auto,
    /// Columns 1-6 sequence area, column 7 indicator, right margin applies.
    Fixed,
    /// No column restrictions.
    Free,
}

/// Attempts to decide the reference format from the first non-blank line of
/// a compilation unit. Blank lines never decide; returns `None` for them.
pub(crate) fn detect_format(line: &str) -> Option<SourceFormat> {
    if line.trim().is_empty() {
        return None;
    }

    let chars: Vec<char> = line.chars().collect();

    // A directive in columns 8-9 can only be fixed format.
    if chars.len() >= 9 && chars[7] == '>' && chars[8] == '>' {
        return Some(SourceFormat::Fixed);
    }

    // Comment or directive starting inside columns 1-7 means free format.
    let head: String = chars.iter().take(7).collect();
    let trimmed = head.trim_start();
    if trimmed.starts_with("*>") || trimmed.starts_with(">>") {
        return Some(SourceFormat::Free);
    }

    // Visible content in the sequence area, or a fixed indicator character.
    let sequence_used = chars.iter().take(6).any(|c| !c.is_whitespace());
    let indicator = chars.get(6).copied();
    if sequence_used || matches!(indicator, Some('*') | Some('-') | Some('/') | Some(' ')) {
        return Some(SourceFormat::Fixed);
    }

    None
}

/// Normalizes one logical line for lexing. The output has the same char
/// length as the input, padded with spaces wherever layout was removed.
pub(crate) fn normalize(line: &str, format: SourceFormat, column_length: usize) -> String {
    match format {
        // Until detection decides, Auto lines are treated as Fixed.
        SourceFormat::Fixed | SourceFormat::Auto => normalize_fixed(line, column_length),
        SourceFormat::Free => normalize_free(line),
    }
}

fn normalize_fixed(line: &str, column_length: usize) -> String {
    let mut chars: Vec<char> = line.chars().collect();

    // Full-line comment: '*' in the indicator column blanks everything.
    if chars.len() >= 7 && chars[6] == '*' {
        return " ".repeat(chars.len());
    }

    // Sequence area and indicator column carry no code. The indicator is
    // blanked too so continuation/debug markers never reach the lexer.
    for c in chars.iter_mut().take(7) {
        *c = ' ';
    }

    // Blank everything past the right margin.
    for c in chars.iter_mut().skip(column_length) {
        *c = ' ';
    }

    blank_from_inline_comment(&mut chars);
    chars.into_iter().collect()
}

fn normalize_free(line: &str) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    blank_from_inline_comment(&mut chars);
    chars.into_iter().collect()
}

/// Blanks the line from the first floating `*>` onward.
fn blank_from_inline_comment(chars: &mut [char]) {
    let mut idx = None;
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == '*' && chars[i + 1] == '>' {
            idx = Some(i);
            break;
        }
    }
    if let Some(start) = idx {
        for c in chars.iter_mut().skip(start) {
            *c = ' ';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_do_not_decide_format() {
        assert_eq!(detect_format(""), None);
        assert_eq!(detect_format("      "), None);
    }

    #[test]
    fn sequence_area_content_means_fixed() {
        assert_eq!(
            detect_format("000100 IDENTIFICATION DIVISION."),
            Some(SourceFormat::Fixed)
        );
    }

    #[test]
    fn indented_code_with_blank_sequence_area_means_fixed() {
        assert_eq!(
            detect_format("       IDENTIFICATION DIVISION."),
            Some(SourceFormat::Fixed)
        );
    }

    #[test]
    fn leading_directive_means_free() {
        assert_eq!(
            detect_format(">>SOURCE FORMAT IS FREE"),
            Some(SourceFormat::Free)
        );
        assert_eq!(detect_format("*> free comment"), Some(SourceFormat::Free));
    }

    #[test]
    fn directive_in_column_eight_means_fixed() {
        assert_eq!(detect_format("       >>SOURCE"), Some(SourceFormat::Fixed));
    }

    #[test]
    fn detection_is_deterministic() {
        let line = "000100 DATA DIVISION.";
        assert_eq!(detect_format(line), detect_format(line));
    }

    #[test]
    fn fixed_comment_line_is_fully_blanked() {
        let line = "000100* a full line comment";
        let normalized = normalize(line, SourceFormat::Fixed, 80);
        assert_eq!(normalized.len(), line.chars().count());
        assert!(normalized.trim().is_empty());
    }

    #[test]
    fn fixed_sequence_area_is_blanked() {
        let normalized = normalize("000100 MOVE A TO B.", SourceFormat::Fixed, 80);
        assert!(normalized.starts_with("       "));
        assert!(normalized.contains("MOVE A TO B."));
    }

    #[test]
    fn fixed_right_margin_is_blanked() {
        let line = format!("{}{}", " ".repeat(7), "A".repeat(80));
        let normalized = normalize(&line, SourceFormat::Fixed, 72);
        assert!(normalized[72..].trim().is_empty());
    }

    #[test]
    fn inline_comment_truncates_both_formats() {
        let fixed = normalize("       DISPLAY X *> trailing", SourceFormat::Fixed, 80);
        assert!(!fixed.contains("trailing"));
        let free = normalize("DISPLAY X *> trailing", SourceFormat::Free, 80);
        assert!(!free.contains("trailing"));
        assert!(free.contains("DISPLAY X"));
    }

    #[test]
    fn free_format_keeps_column_one() {
        let normalized = normalize("DISPLAY X.", SourceFormat::Free, 80);
        assert_eq!(normalized, "DISPLAY X.");
    }
}
