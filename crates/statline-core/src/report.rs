//! Parsed status reports.

use std::fmt;

/// One parsed three-field status report.
///
/// Field meaning is positional and caller-defined: the time session reads
/// them as timezone / session duration / timestamp, the system session as
/// free memory / user-mode CPU time / timestamp. The parser fills all
/// three or none; consumers never see a partially updated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Value of the first report line.
    pub field1: String,
    /// Value of the second report line.
    pub field2: String,
    /// Value of the third report line.
    pub field3: String,
}

impl StatusReport {
    pub fn new(
        field1: impl Into<String>,
        field2: impl Into<String>,
        field3: impl Into<String>,
    ) -> Self {
        Self {
            field1: field1.into(),
            field2: field2.into(),
            field3: field3.into(),
        }
    }

    /// Returns the three fields in wire order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.field1, &self.field2, &self.field3]
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.field1, self.field2, self.field3)
    }
}
