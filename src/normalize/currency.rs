// src/normalize/currency.rs

/// Turns an amount into display text. Every consumer formats through one of
/// these so the same amount always renders byte-identically.
pub trait CurrencyFormat {
    fn format(&self, amount: f64) -> String;
}

/// Danish kroner, whole amounts: `1.250.000 kr.`
///
/// Rounds half away from zero, groups thousands with `.`, and separates the
/// `kr.` symbol with a no-break space (U+00A0), as da-DK locale formatting does.
#[derive(Debug, Clone, Copy, Default)]
pub struct DanishKroner;

const NBSP: char = '\u{a0}';

impl CurrencyFormat for DanishKroner {
    fn format(&self, amount: f64) -> String {
        let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());
        format!("{sign}{}{NBSP}kr.", group_thousands(&digits, '.'))
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
