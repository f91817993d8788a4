//! Locale-style number, currency, and date rendering driven by [`FormatConfig`].

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::config::FormatConfig;

impl FormatConfig {
    /// Formats `value` with `decimals` fraction digits and grouped thousands.
    ///
    /// # Examples
    ///
    /// ```
    /// use office_energy_report::config::FormatConfig;
    ///
    /// let fmt = FormatConfig::default();
    /// assert_eq!(fmt.number(1234567.891, 2), "1.234.567,89");
    /// ```
    pub fn number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        let digits = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let mut out = String::with_capacity(digits.len() + 4);
        if value < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part, &self.thousands_separator));
        if !frac_part.is_empty() {
            out.push_str(&self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }

    /// Formats a currency amount, e.g. `"Rp 60.000"`.
    pub fn currency(&self, value: f64) -> String {
        format!(
            "{} {}",
            self.currency_symbol,
            self.number(value, self.currency_decimals)
        )
    }

    pub fn kwh(&self, value: f64, decimals: usize) -> String {
        format!("{} kWh", self.number(value, decimals))
    }

    pub fn percent(&self, value: f64, decimals: usize) -> String {
        format!("{}%", self.number(value, decimals))
    }

    /// Formats a timestamp with `date_format`, falling back to ISO-8601 when
    /// the pattern cannot be rendered.
    pub fn date(&self, at: &NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.date_format)).is_err() {
            out.clear();
            out.push_str(&at.format("%Y-%m-%d %H:%M").to_string());
        }
        out
    }
}

fn group_thousands(int_part: &str, separator: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn us() -> FormatConfig {
        FormatConfig {
            currency_symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            currency_decimals: 2,
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    #[test]
    fn default_currency_has_no_fraction() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.currency(60000.0), "Rp 60.000");
        assert_eq!(fmt.currency(1444.70), "Rp 1.445");
        assert_eq!(fmt.currency(0.0), "Rp 0");
    }

    #[test]
    fn grouping_boundaries() {
        let fmt = us();
        assert_eq!(fmt.number(999.0, 0), "999");
        assert_eq!(fmt.number(1000.0, 0), "1,000");
        assert_eq!(fmt.number(100000.0, 0), "100,000");
        assert_eq!(fmt.number(1000000.0, 1), "1,000,000.0");
    }

    #[test]
    fn negative_values_keep_sign_unless_rounded_to_zero() {
        let fmt = us();
        assert_eq!(fmt.number(-1234.5, 1), "-1,234.5");
        assert_eq!(fmt.number(-0.001, 2), "0.00");
    }

    #[test]
    fn units_and_percent() {
        let fmt = us();
        assert_eq!(fmt.kwh(2.0, 2), "2.00 kWh");
        assert_eq!(fmt.percent(75.0, 1), "75.0%");
        assert_eq!(fmt.currency(1444.7), "$ 1,444.70");
    }

    #[test]
    fn non_finite_renders_dash() {
        assert_eq!(us().number(f64::NAN, 2), "-");
    }

    #[test]
    fn date_uses_configured_pattern() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap_or_default();
        assert_eq!(FormatConfig::default().date(&at), "16 October 2026, 09:05");
        assert_eq!(us().date(&at), "2026-10-16");
    }
}
