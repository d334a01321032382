//! Rendering three-line status reports (server side).
//!
//! Kept next to the parser so the servers and the client tests share one
//! definition of the wire format.

/// Renders a report from `(label, value)` pairs in wire order.
///
/// Every line is `label: value` followed by `\n`, including the last one.
pub fn render_report(fields: &[(&str, &str); 3]) -> String {
    let mut out = String::new();
    for (label, value) in fields {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}
