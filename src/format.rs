/// Render an amount stored in minor units the way the dashboard shows money:
/// en-US dollars with thousands separators, e.g. `123456` -> `"$1,234.56"`.
pub fn format_currency(amount: i64) -> String {
    let cents = amount.unsigned_abs();
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    if amount < 0 {
        format!("-${whole}.{fraction:02}")
    } else {
        format!("${whole}.{fraction:02}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
