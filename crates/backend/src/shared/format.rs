/// Formats an integer with comma thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(-5000), "-5,000");
/// ```
pub fn format_number(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Won amount rounded to whole units: `₩12,300`
pub fn format_won(amount: f64) -> String {
    format!("₩{}", format_number(amount.round() as i64))
}

/// Rounds to two decimals, the precision of package counts
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cell text for exported sheets: integers without a fraction, others with
/// up to two decimals
pub fn format_cell(value: f64) -> String {
    let rounded = round2(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567890), "1,234,567,890");
        assert_eq!(format_number(-1234), "-1,234");
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(12300.4), "₩12,300");
        assert_eq!(format_won(0.0), "₩0");
    }

    #[test]
    fn test_round2_and_cells() {
        assert_eq!(round2(2.456), 2.46);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(format_cell(192.0), "192");
        assert_eq!(format_cell(2.5), "2.5");
        assert_eq!(format_cell(0.123), "0.12");
    }
}
