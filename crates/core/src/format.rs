//! Display formatting for amounts, dates and transaction labels.
//!
//! Currency is always rendered as fr-FR euros and dates as en-US short dates,
//! whatever the deployment locale.

use chrono::NaiveDate;

use crate::months::MonthFilter;

/// Grouping separator used by fr-FR (narrow no-break space).
const FR_GROUP_SEPARATOR: char = '\u{202F}';

/// Separator between the amount and the currency symbol (no-break space).
const FR_SYMBOL_SEPARATOR: char = '\u{00A0}';

/// Formats an amount as euros the way fr-FR does: `1 234,56 €`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let fraction = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(FR_GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{},{:02}{}€",
        sign, grouped, fraction, FR_SYMBOL_SEPARATOR
    )
}

/// Formats a date as en-US short: `Mar 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Heading for a month: `March 2024`.
pub fn format_month(filter: &MonthFilter) -> String {
    match filter.first_day() {
        Some(first) => first.format("%B %Y").to_string(),
        None => filter.to_string(),
    }
}

/// Appends the occurrence (`3/12`) of a recurring transaction to its label.
///
/// The occurrence is only used when it has the `<digits>/<digits>` shape;
/// anything else (`undefined/12`, `abc`) leaves the label untouched.
pub fn format_transaction_label(label: &str, occurrence: Option<&str>) -> String {
    match occurrence.map(str::trim).filter(|o| is_occurrence(o)) {
        Some(occurrence) => format!("{} {}", label, occurrence),
        None => label.to_string(),
    }
}

fn is_occurrence(raw: &str) -> bool {
    let Some((current, total)) = raw.split_once('/') else {
        return false;
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    all_digits(current) && all_digits(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(1234.56), "1\u{202F}234,56\u{A0}€");
        assert_eq!(format_currency(1_234_567.0), "1\u{202F}234\u{202F}567,00\u{A0}€");
        assert_eq!(format_currency(999.999), "1\u{202F}000,00\u{A0}€");
    }

    #[test]
    fn test_format_currency_small_and_negative() {
        assert_eq!(format_currency(0.0), "0,00\u{A0}€");
        assert_eq!(format_currency(5.5), "5,50\u{A0}€");
        assert_eq!(format_currency(-42.1), "-42,10\u{A0}€");
        assert_eq!(format_currency(-0.001), "0,00\u{A0}€");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "Mar 5, 2024");
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_date(date), "Dec 25, 2023");
    }

    #[test]
    fn test_format_month() {
        let filter = MonthFilter::new(2024, 3).unwrap();
        assert_eq!(format_month(&filter), "March 2024");
    }

    #[test]
    fn test_format_transaction_label() {
        assert_eq!(format_transaction_label("Rent", Some("3/12")), "Rent 3/12");
        assert_eq!(format_transaction_label("Rent", Some("undefined/12")), "Rent");
        assert_eq!(format_transaction_label("Rent", Some("abc")), "Rent");
        assert_eq!(format_transaction_label("Rent", Some("3/")), "Rent");
        assert_eq!(format_transaction_label("Rent", None), "Rent");
    }
}
