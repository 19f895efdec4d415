//! # Result Summary
//!
//! Plain-text rendering of a [`CalculationResult`] for terminals, emails and
//! logs. Amounts are whole dollars with thousands separators; there is no
//! other currency localisation.
//!
//! ## Example
//!
//! ```rust
//! use floor_core::report::{format_money, format_thousands};
//!
//! assert_eq!(format_thousands(1234567), "1,234,567");
//! assert_eq!(format_money(12144), "$12,144");
//! ```

use std::fmt;

use crate::estimate::CalculationResult;
use crate::units::CostRange;

/// Shown under every estimate
pub const ESTIMATE_DISCLAIMER: &str = "This estimate is based on typical installation rates. \
     A quick site check confirms the exact final price.";

/// What the quoted range covers
pub const INCLUDED_ITEMS: [&str; 6] = [
    "Premium flooring materials",
    "Professional installation",
    "Floor levelling (as estimated)",
    "Old floor removal & disposal",
    "Edge finishing (Scotia/Skirting)",
    "Site cleanup & skip bin",
];

/// Group digits in threes: `14548` -> `"14,548"`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_money(value: i64) -> String {
    format!("${}", format_thousands(value))
}

/// `$min – $max`
pub fn format_range(range: CostRange) -> String {
    format!("{} – {}", format_money(range.min), format_money(range.max))
}

/// Headline figures only
pub fn render_headline(result: &CalculationResult) -> String {
    format!(
        "Estimated area: ~{} m²\nEstimated cost: {}",
        result.rounded_area,
        format_range(result.total)
    )
}

/// Headline, inclusions, the rough cost breakdown and the disclaimer.
pub fn render_summary(result: &CalculationResult) -> String {
    Summary(result).to_string()
}

/// Result screen text for one estimate, see [`render_summary`].
pub struct Summary<'a>(pub &'a CalculationResult);

impl Summary<'_> {
    fn rows(&self) -> Vec<(String, String)> {
        let result = self.0;
        let breakdown = &result.breakdown;
        let mut rows = vec![(
            "Flooring materials".to_string(),
            format_money(breakdown.material_cost),
        )];
        for (label, range) in breakdown.ranges() {
            let label = match &result.skip_bin_tier {
                Some(tier) if label.starts_with("Skip bin") => format!("Skip bin ({} bin)", tier),
                _ => label.to_string(),
            };
            rows.push((label, format_range(range)));
        }
        rows
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_headline(self.0))?;
        writeln!(f)?;

        writeln!(f, "What this includes:")?;
        for item in INCLUDED_ITEMS {
            writeln!(f, "  - {}", item)?;
        }
        writeln!(f)?;

        writeln!(f, "Rough cost breakdown:")?;
        let rows = self.rows();
        let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        for (label, value) in &rows {
            writeln!(f, "  {:<width$}  {}", label, value, width = width)?;
        }
        writeln!(f)?;

        write!(f, "Note: {}", ESTIMATE_DISCLAIMER)
    }
}
