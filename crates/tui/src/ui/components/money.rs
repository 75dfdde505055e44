use api_types::Decimal;

/// Formats a balance as en-US currency, e.g. `$1,234.50` or `-$12.00`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(units))
}

/// Formats a transaction amount with two decimals and no currency symbol.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
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
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::new(123450, 2)), "$1,234.50");
        assert_eq!(format_currency(Decimal::new(100000000, 2)), "$1,000,000.00");
        assert_eq!(format_currency(Decimal::new(5, 0)), "$5.00");
    }

    #[test]
    fn negative_currency_keeps_sign_before_symbol() {
        assert_eq!(format_currency(Decimal::new(-1200, 2)), "-$12.00");
        assert_eq!(format_currency(Decimal::new(-1, 3)), "$0.00");
    }

    #[test]
    fn amount_uses_two_decimals() {
        assert_eq!(format_amount(Decimal::new(1505, 1)), "150.50");
        assert_eq!(format_amount(Decimal::new(-75, 0)), "-75.00");
    }
}
