//! Locale-aware rendering of amounts and dates.

use crate::core::transaction::DATE_FORMAT;
use chrono::{Datelike, NaiveDate, Weekday};
use std::str::FromStr;

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];
const MONTHS_SHORT_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_SHORT_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    EnUs,
    EsCl,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::EnUs),
            "es" | "es-cl" => Ok(Locale::EsCl),
            _ => Err(anyhow::anyhow!("Unsupported locale: {}", s)),
        }
    }
}

impl Locale {
    fn thousands_separator(self) -> char {
        match self {
            Locale::EnUs => ',',
            Locale::EsCl => '.',
        }
    }

    fn month_name(self, month0: usize) -> &'static str {
        match self {
            Locale::EnUs => MONTHS_EN[month0],
            Locale::EsCl => MONTHS_ES[month0],
        }
    }

    fn month_short(self, month0: usize) -> &'static str {
        match self {
            Locale::EnUs => MONTHS_SHORT_EN[month0],
            Locale::EsCl => MONTHS_SHORT_ES[month0],
        }
    }

    fn weekday_name(self, weekday: Weekday) -> &'static str {
        match (self, weekday) {
            (Locale::EnUs, Weekday::Mon) => "Monday",
            (Locale::EnUs, Weekday::Tue) => "Tuesday",
            (Locale::EnUs, Weekday::Wed) => "Wednesday",
            (Locale::EnUs, Weekday::Thu) => "Thursday",
            (Locale::EnUs, Weekday::Fri) => "Friday",
            (Locale::EnUs, Weekday::Sat) => "Saturday",
            (Locale::EnUs, Weekday::Sun) => "Sunday",
            (Locale::EsCl, Weekday::Mon) => "lunes",
            (Locale::EsCl, Weekday::Tue) => "martes",
            (Locale::EsCl, Weekday::Wed) => "miércoles",
            (Locale::EsCl, Weekday::Thu) => "jueves",
            (Locale::EsCl, Weekday::Fri) => "viernes",
            (Locale::EsCl, Weekday::Sat) => "sábado",
            (Locale::EsCl, Weekday::Sun) => "domingo",
        }
    }
}

/// Maps an ISO currency code to the symbol placed before amounts.
pub fn currency_symbol(code: &str) -> String {
    match code.trim().to_uppercase().as_str() {
        "USD" | "CLP" | "ARS" | "MXN" | "COP" | "CAD" | "AUD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{other} "),
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    locale: Locale,
    symbol: String,
}

impl Formatter {
    pub fn new(locale: Locale, currency: &str) -> Self {
        Self {
            locale,
            symbol: currency_symbol(currency),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Formats an amount rounded to whole currency units.
    /// Non-finite values format as zero.
    pub fn format_currency(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());
        format!(
            "{sign}{}{}",
            self.symbol,
            group_digits(&digits, self.locale.thousands_separator())
        )
    }

    /// Renders a `YYYY-MM-DD` date as day, short month and year.
    /// Empty input yields empty text; unparseable input is returned as is.
    pub fn format_date(&self, ymd: &str) -> String {
        if ymd.is_empty() {
            return String::new();
        }
        let Ok(date) = NaiveDate::parse_from_str(ymd, DATE_FORMAT) else {
            return ymd.to_string();
        };

        let month = self.locale.month_short(date.month0() as usize);
        match self.locale {
            Locale::EnUs => format!("{month} {:02}, {}", date.day(), date.year()),
            Locale::EsCl => format!("{:02} {month} {}", date.day(), date.year()),
        }
    }

    /// Renders weekday, day and short month, e.g. for a dashboard header.
    pub fn format_long_date(&self, date: NaiveDate) -> String {
        let weekday = self.locale.weekday_name(date.weekday());
        let month = self.locale.month_short(date.month0() as usize);
        match self.locale {
            Locale::EnUs => format!("{weekday}, {month} {:02}", date.day()),
            Locale::EsCl => format!("{weekday}, {:02} {month}", date.day()),
        }
    }

    /// Renders a `YYYY-MM` key as month name and year.
    pub fn format_year_month(&self, ym: &str) -> String {
        let Ok(date) = NaiveDate::parse_from_str(&format!("{ym}-01"), DATE_FORMAT) else {
            return ym.to_string();
        };
        format!(
            "{} {}",
            self.locale.month_name(date.month0() as usize),
            date.year()
        )
    }

    /// Short month name, used for month progress labels.
    pub fn format_month_short(&self, date: NaiveDate) -> &'static str {
        self.locale.month_short(date.month0() as usize)
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_currency_rounds_to_whole_units() {
        let fmt = Formatter::new(Locale::EnUs, "USD");
        assert_eq!(fmt.format_currency(1234.9), "$1,235");
        assert_eq!(fmt.format_currency(1234.4), "$1,234");
        assert_eq!(fmt.format_currency(0.0), "$0");
        assert_eq!(fmt.format_currency(999.0), "$999");
        assert_eq!(fmt.format_currency(1_000_000.0), "$1,000,000");
    }

    #[test]
    fn test_currency_negative_and_non_finite() {
        let fmt = Formatter::new(Locale::EnUs, "USD");
        assert_eq!(fmt.format_currency(-1500.0), "-$1,500");
        assert_eq!(fmt.format_currency(-0.4), "$0");
        assert_eq!(fmt.format_currency(f64::NAN), "$0");
        assert_eq!(fmt.format_currency(f64::INFINITY), "$0");
    }

    #[test]
    fn test_currency_non_numeric_formats_as_zero() {
        let fmt = Formatter::new(Locale::EsCl, "CLP");
        assert_eq!(fmt.format_currency(f64::NAN), fmt.format_currency(0.0));
        assert_eq!(fmt.format_currency(f64::NEG_INFINITY), "$0");
    }

    #[test]
    fn test_currency_follows_locale() {
        let fmt = Formatter::new(Locale::EsCl, "CLP");
        assert_eq!(fmt.format_currency(1234567.0), "$1.234.567");

        let fmt = Formatter::new(Locale::EnUs, "EUR");
        assert_eq!(fmt.format_currency(12.0), "€12");

        let fmt = Formatter::new(Locale::EnUs, "chf");
        assert_eq!(fmt.format_currency(12.0), "CHF 12");
    }

    #[test]
    fn test_format_date() {
        let en = Formatter::new(Locale::EnUs, "USD");
        let es = Formatter::new(Locale::EsCl, "CLP");
        assert_eq!(en.format_date("2025-09-05"), "Sep 05, 2025");
        assert_eq!(es.format_date("2025-09-05"), "05 sept 2025");
        assert_eq!(en.format_date(""), "");
        assert_eq!(en.format_date("garbage"), "garbage");
    }

    #[test]
    fn test_format_long_date_and_month() {
        let en = Formatter::new(Locale::EnUs, "USD");
        let es = Formatter::new(Locale::EsCl, "CLP");
        // 2026-10-15 is a Thursday
        assert_eq!(en.format_long_date(date(2026, 10, 15)), "Thursday, Oct 15");
        assert_eq!(es.format_long_date(date(2026, 10, 15)), "jueves, 15 oct");
        assert_eq!(en.format_year_month("2025-03"), "March 2025");
        assert_eq!(es.format_year_month("2025-03"), "marzo 2025");
        assert_eq!(en.format_year_month("no-date"), "no-date");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("es-CL".parse::<Locale>().unwrap(), Locale::EsCl);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("fr-FR".parse::<Locale>().is_err());
    }
}
