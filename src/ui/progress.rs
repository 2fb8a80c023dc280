//! Quota progress bar.

use super::colors::{muted, usage_color};
use super::format;

const FILLED: &str = "█";
const EMPTY: &str = "░";

pub struct ProgressBar<'a> {
    pub current: f64,
    pub total: f64,
    pub width: usize,
    pub label: Option<&'a str>,
    pub show_percentage: bool,
    pub show_count: bool,
}

impl Default for ProgressBar<'_> {
    fn default() -> Self {
        Self {
            current: 0.0,
            total: 0.0,
            width: 40,
            label: None,
            show_percentage: true,
            show_count: true,
        }
    }
}

impl ProgressBar<'_> {
    /// Render the bar (and optional label line) with two-space indent.
    ///
    /// The fill is capped at 100% even when usage exceeds the quota.
    pub fn render(&self) -> String {
        let percentage = if self.total > 0.0 {
            (self.current / self.total * 100.0).min(100.0)
        } else {
            0.0
        };
        let filled = (percentage / 100.0 * self.width as f64).round() as usize;
        let empty = self.width - filled;

        let color = usage_color(percentage);
        let bar = format!(
            "  {}{}",
            color(&FILLED.repeat(filled)),
            muted(&EMPTY.repeat(empty))
        );

        let mut lines = Vec::new();

        if self.label.is_some() || self.show_count {
            let mut parts = Vec::new();
            if let Some(label) = self.label {
                parts.push(super::colors::label(label).to_string());
            }
            if self.show_count {
                let count = format!(
                    "{} / {} used",
                    format::quantity(self.current),
                    format::quantity(self.total)
                );
                parts.push(color(&count).to_string());
            }
            lines.push(format!("  {}", parts.join("  ")));
        }

        if self.show_percentage {
            lines.push(format!("{}  {}", bar, color(&format!("{percentage:.1}%"))));
        } else {
            lines.push(bar);
        }

        lines.join("\n")
    }
}
