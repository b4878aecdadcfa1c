//! Plain-text rendering of corpus run reports.

use std::fmt::Write;

use lexguard_ai::RunReport;
use lexguard_core::Category;

const LABEL_WIDTH: usize = 22;

/// Render a run report as an aligned two-section card.
pub fn render_report(report: &RunReport, tracked: &[Category]) -> String {
    let mut out = String::new();

    section(&mut out, "Input");
    row(&mut out, "documents", report.documents);
    row(&mut out, "chunks", report.chunks);
    row(&mut out, "dropped spans", report.zones.dropped);
    row(&mut out, "clipped spans", report.zones.clipped);
    if let Some(n) = report.balanced_rows {
        row(&mut out, "rows after balancing", n);
    }

    section(&mut out, "Zones");
    for &category in tracked {
        row(&mut out, category.name(), report.zones.matches_for(category));
    }

    section(&mut out, "Chunk labels");
    for category in Category::ALL {
        row(&mut out, category.name(), report.label_count(category));
    }

    let low = report.low_signal(tracked);
    if !low.is_empty() {
        let names: Vec<&str> = low.iter().map(|c| c.name()).collect();
        let _ = writeln!(out, "\nlow signal: {}", names.join(", "));
    }
    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "── {title} ──");
}

fn row(out: &mut String, label: &str, value: usize) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$} {value}");
}
