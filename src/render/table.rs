use crate::log::Field;
use crate::model::{FieldStats, SummaryTable};

const HEADERS: [&str; 6] = ["group", "field", "n", "mean", "min", "max"];

/// Render a fixed-width summary table, one row per (group, field).
///
/// `only` restricts the rows to the given fields; empty means all fields.
pub fn render_summary_table(summary: &SummaryTable, only: &[Field]) -> String {
    let mut rows: Vec<[String; 6]> = Vec::new();
    for (group, fields) in summary {
        for (field, stats) in fields {
            if !only.is_empty() && !only.contains(field) {
                continue;
            }
            rows.push(row(group, *field, stats));
        }
    }

    let mut widths = HEADERS.map(str::len);
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(str::to_string);
    push_line(&mut out, &header, &widths);
    for r in &rows {
        push_line(&mut out, r, &widths);
    }
    out
}

fn row(group: &str, field: Field, stats: &FieldStats) -> [String; 6] {
    [
        group.to_string(),
        field.to_string(),
        stats.count.to_string(),
        fmt_num(stats.mean),
        fmt_num(stats.min),
        fmt_num(stats.max),
    ]
}

// Text columns left-aligned, numeric columns right-aligned.
fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let mut line = String::new();
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let padded = if i < 2 {
            format!("{:<w$}", cell, w = *w)
        } else {
            format!("{:>w$}", cell, w = *w)
        };
        line.push_str(&padded);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{:.4}", v)
    }
}
