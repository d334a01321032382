//! Parsing three-line status reports.
//!
//! Each server sends reports of the form:
//!
//! ```text
//! Current Timezone: UTC+3
//! Session Duration: 0h 12m 45s
//! Current Time: Sat Aug 30 10:00:00 2026
//! ```
//!
//! Fields are positional, not label-matched: the value of each of the
//! first three lines is whatever follows the last `": "` on that line.
//! Parsing is pure and all-or-nothing - a report either yields all three
//! fields or fails, never a partial result.

use statline_core::StatusReport;
use thiserror::Error;

/// Delimiter separating a line's label from its value.
const FIELD_DELIMITER: &str = ": ";

/// Minimum number of lines a report must carry.
const MIN_REPORT_LINES: usize = 3;

/// Fallback value used when a line has no `": "` delimiter.
pub const DEFAULT_SENTINEL: &str = "N/A";

/// Errors produced while parsing a status report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The report had fewer than the three required lines.
    #[error("Status report has {lines} line(s), need at least {MIN_REPORT_LINES}")]
    TooFewLines { lines: usize },
}

/// Parser for the three-line `label: value` report format.
///
/// Stateless apart from the configured sentinel; one parser instance can
/// be shared (cloned) across sessions.
#[derive(Debug, Clone)]
pub struct ReportParser {
    sentinel: &'static str,
}

impl ReportParser {
    /// Creates a parser with the default `"N/A"` sentinel.
    pub fn new() -> Self {
        Self::with_sentinel(DEFAULT_SENTINEL)
    }

    /// Creates a parser with a caller-chosen sentinel for delimiter-less
    /// lines. The sentinel is a placeholder literal, not meaningful data.
    pub fn with_sentinel(sentinel: &'static str) -> Self {
        Self { sentinel }
    }

    /// Parses one received text block into a [`StatusReport`].
    ///
    /// Only the first three lines are interpreted; trailing lines are
    /// ignored so longer reports stay forward-compatible.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TooFewLines`] when the text carries fewer
    /// than three lines.
    pub fn parse(&self, text: &str) -> Result<StatusReport, ParseError> {
        let mut lines = text.lines();

        let (first, second, third) = match (lines.next(), lines.next(), lines.next()) {
            (Some(first), Some(second), Some(third)) => (first, second, third),
            (first, second, _) => {
                let lines = [first, second].iter().flatten().count();
                return Err(ParseError::TooFewLines { lines });
            }
        };

        Ok(StatusReport::new(
            self.field_value(first),
            self.field_value(second),
            self.field_value(third),
        ))
    }

    /// Extracts the substring after the last `": "`, or the sentinel when
    /// the delimiter is absent.
    fn field_value<'a>(&self, line: &'a str) -> &'a str {
        match line.rsplit_once(FIELD_DELIMITER) {
            Some((_, value)) => value,
            None => self.sentinel,
        }
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_report() {
        let parser = ReportParser::new();
        let report = parser
            .parse("Timezone: UTC+3\nSession: 00:12:45\nTime: 10:00:00\n")
            .unwrap();

        assert_eq!(report.field1, "UTC+3");
        assert_eq!(report.field2, "00:12:45");
        assert_eq!(report.field3, "10:00:00");
    }

    #[test]
    fn test_parse_ignores_trailing_lines() {
        let parser = ReportParser::new();
        let report = parser
            .parse("A: x\nB: y\nC: z\nD: extra\nE: more\n")
            .unwrap();

        assert_eq!(report.fields(), ["x", "y", "z"]);
    }

    #[test]
    fn test_parse_two_lines_fails() {
        let parser = ReportParser::new();
        let result = parser.parse("Memory: 42%\nCPU: 10s\n");

        assert_eq!(result, Err(ParseError::TooFewLines { lines: 2 }));
    }

    #[test]
    fn test_parse_empty_input_fails() {
        let parser = ReportParser::new();
        assert_eq!(parser.parse(""), Err(ParseError::TooFewLines { lines: 0 }));
    }

    #[test]
    fn test_parse_one_line_fails() {
        let parser = ReportParser::new();
        assert_eq!(
            parser.parse("Only: one\n"),
            Err(ParseError::TooFewLines { lines: 1 })
        );
    }

    #[test]
    fn test_missing_delimiter_yields_sentinel() {
        let parser = ReportParser::new();
        let report = parser.parse("nodelimiter\nB: y\nC: z\n").unwrap();

        assert_eq!(report.field1, DEFAULT_SENTINEL);
        assert_eq!(report.field2, "y");
        assert_eq!(report.field3, "z");
    }

    #[test]
    fn test_custom_sentinel() {
        let parser = ReportParser::with_sentinel("Unknown");
        let report = parser.parse("A: x\nplain\nC: z\n").unwrap();

        assert_eq!(report.field2, "Unknown");
    }

    #[test]
    fn test_value_taken_after_last_delimiter() {
        let parser = ReportParser::new();
        let report = parser
            .parse("Label: nested: value\nB: y\nC: z\n")
            .unwrap();

        // Last ": " wins, matching positional extraction.
        assert_eq!(report.field1, "value");
    }

    #[test]
    fn test_colons_without_space_are_not_delimiters() {
        let parser = ReportParser::new();
        let report = parser
            .parse("Current Time: Sat Aug 30 10:00:00 2026\nB: y\nC: z\n")
            .unwrap();

        // "10:00:00" has no ": " so the whole timestamp survives.
        assert_eq!(report.field1, "Sat Aug 30 10:00:00 2026");
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let parser = ReportParser::new();
        let report = parser.parse("A: x\nB: y\nC: z").unwrap();
        assert_eq!(report.fields(), ["x", "y", "z"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = ReportParser::new();
        let input = "A: x\nB: y\nC: z\n";
        assert_eq!(parser.parse(input), parser.parse(input));
    }
}
