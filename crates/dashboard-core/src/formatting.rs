//! Display formatting for KPI cards and chart labels.

/// Currency symbol shown in front of monetary figures.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Placeholder shown when a figure cannot be computed.
pub const NOT_AVAILABLE: &str = "n/a";

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a scaled epsilon so exact binary midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        // `frac_str` looks like "0.50"; keep ".50".
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount in rupees, e.g. `"₹ 12,345"`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_rupees;
///
/// assert_eq!(format_rupees(1234567.4, 0), "₹ 1,234,567");
/// assert_eq!(format_rupees(455.6, 0), "₹ 456");
/// ```
pub fn format_rupees(amount: f64, decimals: u32) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_number(amount, decimals))
}

/// Format an average delivery time, e.g. `"32.5 min"`.
pub fn format_minutes(minutes: f64) -> String {
    format!("{:.1} min", minutes)
}

/// Format a percentage with two decimals, e.g. `"12.34%"`.
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// Apply `f` to a present value or fall back to [`NOT_AVAILABLE`].
pub fn format_optional(value: Option<f64>, f: impl Fn(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Abbreviate large values for narrow chart labels: `950`, `12.3K`, `4.1M`.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format_number(value, 0)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = s.len() % 3;
    for (i, c) in s.chars().enumerate() {
        if i != 0 && i % 3 == remainder {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
