//! # Display Formatting
//!
//! Currency formatting for reports. Amounts are rounded to whole taka and
//! grouped the South Asian way: the last three digits, then pairs
//! (`12,34,567`).

/// Format an amount as Bangladeshi taka with no decimals.
///
/// Non-finite amounts format as zero.
///
/// # Example
///
/// ```rust
/// use boq_core::format::format_currency_bdt;
///
/// assert_eq!(format_currency_bdt(1234567.4), "BDT 12,34,567");
/// assert_eq!(format_currency_bdt(-950.5), "-BDT 951");
/// ```
pub fn format_currency_bdt(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}BDT {}", sign, group_south_asian(&format!("{:.0}", rounded.abs())))
}

/// Insert separators into a string of digits: last group of three, then
/// groups of two.
fn group_south_asian(digits: &str) -> String {
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
    format!("{},{}", groups.join(","), tail)
}
