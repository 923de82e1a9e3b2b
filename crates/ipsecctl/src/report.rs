//! Fixed-width hand-off sheet for the CPE team.
//!
//! Every row is `| <label:30> | <value:70>|`, 106 columns wide; tunnel
//! headings span both columns. Values longer than their column push the
//! closing pipe out rather than being cut.

use ipsecctl_core::ConnectionReport;
use ipsecctl_core::report::ReportLine;

const LABEL_WIDTH: usize = 30;
const VALUE_WIDTH: usize = 70;
/// Label, value and the ` | ` between them.
const SPAN_WIDTH: usize = LABEL_WIDTH + 3 + VALUE_WIDTH;

pub fn render_sheet(report: &ConnectionReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "|{}|{}|",
        "-".repeat(LABEL_WIDTH + 2),
        "-".repeat(VALUE_WIDTH + 1)
    ));
    for line in report.lines() {
        out.push(match line {
            ReportLine::Heading(text) => format!("| {text:<SPAN_WIDTH$}|"),
            ReportLine::Field { label, value } => {
                format!("| {label:<LABEL_WIDTH$} | {value:<VALUE_WIDTH$}|")
            }
        });
    }
    out.push(format!("|{}|", "=".repeat(SPAN_WIDTH + 1)));
    out.join("\n")
}
