//! Number formatting for narrative text.

/// Placeholder for a missing number.
pub const MISSING: &str = "\u{2014}";

/// Formats a statistic the way the narrative document prints it:
/// values of magnitude 1000 and above get thousands separators and no
/// decimals, whole numbers no decimals, anything else two decimals.
pub fn format_value(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => {
            if v.abs() >= 1000.0 || v.fract() == 0.0 {
                format_integer(v)
            } else {
                format!("{:.2}", v)
            }
        }
        _ => MISSING.to_string(),
    }
}

/// Rounds to the nearest integer and inserts thousands separators.
pub fn format_integer(v: f64) -> String {
    let rounded = format!("{:.0}", v);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    if digits.chars().all(|c| c == '0') {
        return "0".to_string();
    }
    format!("{}{}", sign, group_thousands(digits))
}

/// Like [`format_integer`] but always carries a sign, e.g. `+1,250` or `+0`.
pub fn format_signed(v: f64) -> String {
    let body = format_integer(v);
    if body.starts_with('-') {
        body
    } else {
        format!("+{}", body)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_values_use_separators_without_decimals() {
        assert_eq!(format_value(Some(1234.56)), "1,235");
        assert_eq!(format_value(Some(-1_000_000.0)), "-1,000,000");
        assert_eq!(format_value(Some(1000.0)), "1,000");
    }

    #[test]
    fn small_values_keep_two_decimals_unless_whole() {
        assert_eq!(format_value(Some(50.0)), "50");
        assert_eq!(format_value(Some(33.333)), "33.33");
        assert_eq!(format_value(Some(0.5)), "0.50");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(format_value(None), MISSING);
        assert_eq!(format_value(Some(f64::NAN)), MISSING);
    }

    #[test]
    fn signed_values() {
        assert_eq!(format_signed(1250.0), "+1,250");
        assert_eq!(format_signed(-20.4), "-20");
        assert_eq!(format_signed(0.0), "+0");
        assert_eq!(format_signed(-0.2), "+0");
    }
}
