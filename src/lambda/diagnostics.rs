//! Human-readable error reports
//!
//! Every lex and parse error is shown with its message followed by the surrounding
//! source: two lines before the error row, the row itself marked with `>>`, and two
//! lines after, all numbered from 1.

use crate::lambda::range::Range;
use crate::lambda::SourceOutput;
use std::fmt::Write;

/// Format source context around an error location.
pub fn format_source_context(source: &str, range: &Range) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.row;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        let _ = writeln!(context, "{} {:3} | {}", marker, line_num + 1, lines[line_num]);
    }

    // An error past the last line (e.g. end of input after a trailing newline)
    if error_line >= lines.len() {
        let _ = writeln!(context, ">> {:3} |", error_line + 1);
    }

    context
}

/// Render every error of `output`, lex errors first, each with its source context.
pub fn render_errors(source: &str, output: &SourceOutput) -> String {
    let mut report = String::new();

    for error in &output.lex_errors {
        let _ = writeln!(report, "lex error: {}", error);
        report.push_str(&format_source_context(source, &error.range));
    }
    for error in &output.parse_errors {
        let _ = writeln!(report, "parse error: {}", error);
        report.push_str(&format_source_context(source, &error.range()));
    }

    report
}
