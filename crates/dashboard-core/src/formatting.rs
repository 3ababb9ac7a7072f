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

    // Nudge by a relative epsilon so exact binary midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // "0.50" -> ".50"
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as a USD string with two decimal places and
/// thousands separators.
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56),  "$1,234.56");
/// assert_eq!(format_currency(-9.99),    "$-9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("$-{}", format_number(amount.abs(), 2))
    } else {
        format!("${}", format_number(amount, 2))
    }
}

/// Revenue in millions with one decimal, as shown on the revenue card.
///
/// ```
/// use dashboard_core::formatting::format_millions;
///
/// assert_eq!(format_millions(1_260_000.0), "$1.3M");
/// assert_eq!(format_millions(1_500.0), "$0.0M");
/// ```
pub fn format_millions(amount: f64) -> String {
    format!("${:.1}M", amount / 1_000_000.0)
}

/// Revenue in whole thousands, as shown in the brand detail panel.
///
/// ```
/// use dashboard_core::formatting::format_thousands;
///
/// assert_eq!(format_thousands(15_400.0), "$15K");
/// ```
pub fn format_thousands(amount: f64) -> String {
    format!("${:.0}K", amount / 1_000.0)
}

/// A percentage with one decimal and a trailing `%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Upper-case the first character, leaving the rest untouched.
///
/// ```
/// use dashboard_core::formatting::title_case;
///
/// assert_eq!(title_case("sawtooth"), "Sawtooth");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounds_half_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
        assert_eq!(format_number(74.5, 0), "75");
    }

    #[test]
    fn test_format_number_tiny_negative_has_no_sign() {
        assert_eq!(format_number(-0.001, 0), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_234.56), "$1,234.56");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-9.99), "$-9.99");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(2_400_000.0), "$2.4M");
        assert_eq!(format_millions(0.0), "$0.0M");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1_600.0), "$2K");
        assert_eq!(format_thousands(999.0), "$1K");
        assert_eq!(format_thousands(250_000.0), "$250K");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(70.0), "70.0%");
        assert_eq!(format_percent(66.666), "66.7%");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("square"), "Square");
        assert_eq!(title_case("Triangle"), "Triangle");
        assert_eq!(title_case("x"), "X");
    }
}
