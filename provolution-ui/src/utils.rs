//! Number formatting shared by the text views.

/// Footprint that fills a comparison bar completely (15 t).
const FULL_BAR_KG: f64 = 15_000.0;

/// SEC-score rating, as coloured on the result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 7.0 {
            Self::Good
        } else if score >= 4.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "needs work",
        }
    }
}

/// Kilograms as tonnes with one decimal (`8450.0` → `"8.5 t"`).
pub fn format_tonnes(kg: f64) -> String {
    format!("{:.1} t", kg / 1000.0)
}

/// Whole kilograms with thousands separators (`12345.6` → `"12,346 kg"`).
pub fn format_kg(kg: f64) -> String {
    let rounded = kg.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} kg")
}

/// Percentage delta with explicit sign (`-21.8` → `"-22%"`, `76.0` → `"+76%"`).
pub fn format_delta(percent: f64) -> String {
    format!("{:+.0}%", percent)
}

/// Fill level of a comparison bar for a footprint, in percent, capped at 100.
pub fn comparison_fill(kg: f64) -> f64 {
    (kg / FULL_BAR_KG * 100.0).clamp(0.0, 100.0)
}

/// Horizontal bar of `width` cells filled to `percent`.
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
