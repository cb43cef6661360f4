//! Line-bounded diff truncation.

use crate::constants::TRUNCATION_MARKER;

/// A diff cut down to a line budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedDiff {
    /// The text to report. Equals the trimmed diff when nothing was cut.
    pub text: String,
    /// Number of lines in the original diff.
    pub total_lines: usize,
    pub was_truncated: bool,
}

/// Keep the first `max_lines` lines of `diff`.
///
/// Over budget, the kept lines are joined with `\n` and followed by
/// [`TRUNCATION_MARKER`]. Within budget the text is the diff with
/// surrounding whitespace trimmed, byte for byte what the report carries
/// as the full diff.
pub fn truncate_diff(diff: &str, max_lines: usize) -> TruncatedDiff {
    let lines: Vec<&str> = diff.lines().collect();
    let total_lines = lines.len();

    if total_lines > max_lines {
        let mut text = lines[..max_lines].join("\n");
        text.push_str(TRUNCATION_MARKER);
        TruncatedDiff {
            text,
            total_lines,
            was_truncated: true,
        }
    } else {
        TruncatedDiff {
            text: diff.trim().to_string(),
            total_lines,
            was_truncated: false,
        }
    }
}
