//! Presentation formatting for dashboard figures.

pub const CURRENCY_SYMBOL: &str = "€";
pub const NOT_AVAILABLE: &str = "n/a";

/// `€` plus grouped digits, e.g. `€320,000` or `€1,234.5`. At most two fraction digits.
pub fn currency(value: Option<f64>) -> String {
    match value {
        Some(amount) if amount.is_finite() => format!("{CURRENCY_SYMBOL}{}", grouped(amount)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One decimal place followed by `%`; the input is already a percentage.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(pct) if pct.is_finite() => format!("{pct:.1}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// A fraction (`0.32`) rendered as a one-decimal percentage (`32.0%`).
pub fn ratio_as_percent(value: Option<f64>) -> String {
    percent(value.map(|ratio| ratio * 100.0))
}

/// Shortest form of a number: `92` rather than `92.0`, `92.5` stays as is.
pub fn plain(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let rounded = (value * 100.0).round() / 100.0;
        format!("{rounded}")
    }
}

/// Digits grouped by thousands with `,`, fraction trimmed of trailing zeros.
pub fn grouped(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if fraction > 0 {
        let fraction = format!("{fraction:02}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }

    if value < 0.0 && cents > 0 {
        out.insert(0, '-');
    }
    out
}
