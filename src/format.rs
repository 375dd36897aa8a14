//! Display Formatting
//!
//! The one place numbers become dashboard text.
//!
//! Currency is always US dollars with zero fraction digits (`$18,251`). The
//! KPI cards, the customer table and the prediction panel all use this
//! precision, so cents never show up in one widget and not another.

/// Format a dollar amount rounded to whole dollars with thousands separators.
///
/// Rounds half away from zero. Non-finite values render as `$NaN` / `$∞`.
pub fn currency(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }

    let sign = if value.is_sign_negative() && value.round() != 0.0 {
        "-"
    } else {
        ""
    };

    if value.is_infinite() {
        return format!("{}$∞", sign);
    }

    let whole = value.abs().round();
    format!("{}${}", sign, group_thousands(&format!("{:.0}", whole)))
}

/// Format a 0-1 fraction as a percentage with one decimal (`0.732` -> `73.2%`)
pub fn percent(fraction: f64) -> String {
    format!("{}%", tenths(fraction * 100.0))
}

/// A 0-1 fraction scaled to percent and rounded to one decimal, for chart values.
///
/// Same rounding as [`percent`], so a bar and its label never disagree.
pub fn percent_value(fraction: f64) -> f64 {
    let value = fraction * 100.0;
    if !value.is_finite() {
        return value;
    }
    tenths(value).parse().unwrap_or(value)
}

/// One fraction digit, rounding exact ties away from zero (`56.25` -> `56.3`).
///
/// `{:.1}` rounds the exact binary value correctly but sends ties to even.
/// A one-digit tie needs a fractional part of exactly .x5, and the only such
/// values an f64 can hold end in .25 or .75, i.e. an odd number of quarters.
fn tenths(value: f64) -> String {
    if !value.is_finite() {
        return raw_number(value);
    }

    let magnitude = value.abs();
    let quarters = magnitude * 4.0;
    let digits = if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        format!("{:.1}", (magnitude * 10.0).ceil() / 10.0)
    } else {
        format!("{:.1}", magnitude)
    };

    if value < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Shortest text for a number, without a trailing `.0` on integral values.
///
/// Used for values the backend already formatted (e.g. `churn_rate_pct`) and
/// for the raw priority score. Magnitudes from 1e21 up and below 1e-6 switch
/// to exponent form (`1e+21`, `1.5e-7`), as browsers print them.
pub fn raw_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        // `{:e}` is also shortest round-trip, only the exponent sign differs
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }

    // Shortest round-trip form: 27 -> "27", 26.5 -> "26.5"
    format!("{}", value)
}

/// A backend percentage value rendered verbatim with a `%` suffix
pub fn verbatim_percent(value: f64) -> String {
    format!("{}%", raw_number(value))
}

/// Integer count with thousands separators (`5634` -> `5,634`)
pub fn count(value: u64) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_whole_dollars() {
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(999.0), "$999");
        assert_eq!(currency(1000.0), "$1,000");
        assert_eq!(currency(18250.5), "$18,251");
        assert_eq!(currency(1234567.49), "$1,234,567");
        assert_eq!(currency(100000.0), "$100,000");
    }

    #[test]
    fn test_currency_negative_and_tiny() {
        assert_eq!(currency(-1234.4), "-$1,234");
        // Rounds to zero: no negative sign
        assert_eq!(currency(-0.2), "$0");
    }

    #[test]
    fn test_currency_non_finite() {
        assert_eq!(currency(f64::NAN), "$NaN");
        assert_eq!(currency(f64::INFINITY), "$∞");
        assert_eq!(currency(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent(0.732), "73.2%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(1.0), "100.0%");
        assert_eq!(percent(0.05), "5.0%");
    }

    #[test]
    fn test_percent_exact_ties_round_up() {
        assert_eq!(percent(0.5625), "56.3%");
        assert_eq!(percent(0.8125), "81.3%");
        assert_eq!(percent(0.0125), "1.3%");
        assert_eq!(percent(-0.5625), "-56.3%");
    }

    #[test]
    fn test_percent_near_ties_follow_binary_value() {
        // 0.0105 * 100 lands just above 1.05, 0.0115 * 100 just below 1.15
        assert_eq!(percent(0.0105), "1.1%");
        assert_eq!(percent(0.0115), "1.1%");
        assert_eq!(percent(0.0045), "0.4%");
        assert_eq!(percent(f64::NAN), "NaN%");
    }

    #[test]
    fn test_percent_value_rounds_for_charts() {
        assert_eq!(percent_value(0.4123), 41.2);
        assert_eq!(percent_value(0.15), 15.0);
        assert_eq!(percent_value(0.5625), 56.3);
        assert_eq!(percent_value(0.0115), 1.1);
    }

    #[test]
    fn test_verbatim_percent() {
        assert_eq!(verbatim_percent(26.5), "26.5%");
        assert_eq!(verbatim_percent(27.0), "27%");
    }

    #[test]
    fn test_raw_number() {
        assert_eq!(raw_number(595.51), "595.51");
        assert_eq!(raw_number(12.0), "12");
        assert_eq!(raw_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_raw_number_exponent_form() {
        assert_eq!(raw_number(1e21), "1e+21");
        assert_eq!(raw_number(-2.5e22), "-2.5e+22");
        assert_eq!(raw_number(1e-7), "1e-7");
        assert_eq!(raw_number(1.5e-7), "1.5e-7");
        assert_eq!(raw_number(1e20), "100000000000000000000");
        assert_eq!(raw_number(0.000001), "0.000001");
        assert_eq!(raw_number(0.0), "0");
    }

    #[test]
    fn test_count_grouping() {
        assert_eq!(count(7), "7");
        assert_eq!(count(5634), "5,634");
        assert_eq!(count(1_000_000), "1,000,000");
    }
}
