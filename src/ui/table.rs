//! Model breakdown table with box-drawing borders.

use unicode_width::UnicodeWidthStr;

use super::colors::{heading, label, multiplier_color, muted, value, warning, Style};
use super::format;
use crate::report::ModelRow;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

const ALIGNS: [Align; 5] = [
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Right,
];

/// Render the per-model breakdown, indented two spaces.
///
/// Layout mirrors the rest of the dashboard: one separator per row, right
/// aligned numeric columns, and a bold total row at the bottom.
pub fn render_model_table(rows: &[ModelRow]) -> String {
    if rows.is_empty() {
        return format!("\n  {}\n", muted("No usage data found for this period."));
    }

    let header: Vec<(String, Style)> = [
        "Model",
        "Requests",
        "Multiplier",
        "Premium Reqs",
        "Cost",
    ]
    .iter()
    .map(|h| (h.to_string(), heading as Style))
    .collect();

    let mut body: Vec<Vec<(String, Style)>> = Vec::new();
    for row in rows {
        let multiplier_cell: (String, Style) = if row.is_included {
            ("0x (incl)".to_string(), super::colors::included)
        } else {
            (
                format::multiplier(row.multiplier),
                multiplier_color(row.multiplier),
            )
        };
        let premium_cell: (String, Style) = if row.is_included {
            ("—".to_string(), muted)
        } else {
            (format::quantity(row.premium_requests), value)
        };
        let cost_cell: (String, Style) = if row.cost > 0.0 {
            (format::money(row.cost), warning)
        } else {
            (format::money(0.0), muted)
        };

        body.push(vec![
            (row.model.clone(), label),
            (format::quantity(row.requests), value),
            multiplier_cell,
            premium_cell,
            cost_cell,
        ]);
    }

    let total_requests: f64 = rows.iter().map(|r| r.requests).sum();
    let total_premium: f64 = rows.iter().map(|r| r.premium_requests).sum();
    let total_cost: f64 = rows.iter().map(|r| r.cost).sum();
    body.push(vec![
        ("Total".to_string(), heading),
        (format::quantity(total_requests), heading),
        (String::new(), heading),
        (format::quantity(total_premium), heading),
        (
            format::money(total_cost),
            if total_cost > 0.0 { warning } else { muted },
        ),
    ]);

    // Column widths over plain text, one space of padding per side
    let mut widths = [0usize; 5];
    for row in std::iter::once(&header).chain(body.iter()) {
        for (i, (text, _)) in row.iter().enumerate() {
            widths[i] = widths[i].max(text.width());
        }
    }

    let mut lines = Vec::new();
    lines.push(rule(&widths, "┌", "┬", "┐"));
    lines.push(format_row(&header, &widths));
    for row in &body {
        lines.push(rule(&widths, "├", "┼", "┤"));
        lines.push(format_row(row, &widths));
    }
    lines.push(rule(&widths, "└", "┴", "┘"));

    lines
        .into_iter()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rule(widths: &[usize; 5], left: &str, mid: &str, right: &str) -> String {
    let spans: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", spans.join(mid))
}

fn format_row(cells: &[(String, Style)], widths: &[usize; 5]) -> String {
    let mut out = String::from("│");
    for (i, (text, style)) in cells.iter().enumerate() {
        let pad = widths[i] - text.width();
        let padded = match ALIGNS[i] {
            Align::Left => format!("{text}{}", " ".repeat(pad)),
            Align::Right => format!("{}{text}", " ".repeat(pad)),
        };
        out.push(' ');
        out.push_str(&style(&padded).to_string());
        out.push_str(" │");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(model: &str, requests: f64, premium: f64, mult: f64, included: bool, cost: f64) -> ModelRow {
        ModelRow {
            model: model.to_string(),
            requests,
            premium_requests: premium,
            multiplier: mult,
            is_included: included,
            cost,
        }
    }

    fn plain(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match c {
                '\x1b' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if !in_escape => out.push(c),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_empty_rows_message() {
        let text = plain(&render_model_table(&[]));
        assert!(text.contains("No usage data found"));
    }

    #[test]
    fn test_table_contents() {
        let rows = vec![
            row("Claude Opus 4.5", 50.0, 150.0, 3.0, false, 2.0),
            row("GPT-4o", 150.0, 0.0, 0.0, true, 0.0),
        ];
        let text = plain(&render_model_table(&rows));

        assert!(text.contains("Model"));
        assert!(text.contains("Claude Opus 4.5"));
        assert!(text.contains("3x"));
        assert!(text.contains("$2.00"));
        assert!(text.contains("0x (incl)"));
        assert!(text.contains("—"));
        // Total row sums both models
        assert!(text.contains("Total"));
        assert!(text.contains("200"));
        assert!(text.contains("150"));
    }

    #[test]
    fn test_table_borders_align() {
        let rows = vec![row("GPT-5", 10.0, 10.0, 1.0, false, 0.0)];
        let text = plain(&render_model_table(&rows));
        let lines: Vec<&str> = text.lines().collect();
        // top rule, header, rule, row, rule, total, bottom rule
        assert_eq!(lines.len(), 7);
        let width = unicode_width::UnicodeWidthStr::width(lines[0]);
        for line in &lines {
            assert_eq!(unicode_width::UnicodeWidthStr::width(*line), width);
        }
        assert!(lines[0].trim_start().starts_with('┌'));
        assert!(lines[6].trim_start().starts_with('└'));
    }
}
