//! Rupee formatting with Indian digit grouping (`₹12,34,567.89`).

/// Format `value` as rupees with two decimals and lakh/crore grouping.
pub fn format_inr(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}₹{}.{frac_part}", group_indian(int_part))
}

/// Group digits as the last three, then pairs: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_are_not_grouped() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(0.05), "₹0.05");
        assert_eq!(format_inr(999.5), "₹999.50");
    }

    #[test]
    fn lakh_and_crore_grouping() {
        assert_eq!(format_inr(1_000.0), "₹1,000.00");
        assert_eq!(format_inr(100_000.0), "₹1,00,000.00");
        assert_eq!(format_inr(1_234_567.891), "₹12,34,567.89");
        assert_eq!(format_inr(290_000.0), "₹2,90,000.00");
        assert_eq!(format_inr(12_345_678.0), "₹1,23,45,678.00");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_inr(-100_000.0), "-₹1,00,000.00");
        assert_eq!(format_inr(-0.001), "₹0.00");
    }
}
