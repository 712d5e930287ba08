//! Display formatting for amounts, shares and chart ticks.
//!
//! Amounts are integer cents. Currencies without minor units (IDR, JPY, ...)
//! are rounded to whole units and printed without decimals.

/// Format cents as `symbol + number`, with a leading `-` for negatives.
///
/// `format_money(123456700, "IDR", "id-ID")` gives `"Rp\u{a0}1.234.567"`.
pub fn format_money(cents: i64, currency: &str, locale: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let (thousands_sep, decimal_sep) = locale_separators(locale);
    let symbol = currency_symbol(currency);

    if has_minor_units(currency) {
        let whole = abs_cents / 100;
        let fractional = abs_cents % 100;
        format!(
            "{}{}{}{}{:02}",
            sign,
            symbol,
            format_with_thousands(whole, thousands_sep),
            decimal_sep,
            fractional
        )
    } else {
        let whole = (abs_cents + 50) / 100;
        format!(
            "{}{}{}",
            sign,
            symbol,
            format_with_thousands(whole, thousands_sep)
        )
    }
}

/// Format a percentage share with one decimal, e.g. `83.3%` or `83,3%`.
pub fn format_share(value: f64, locale: &str) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    let (_, decimal_sep) = locale_separators(locale);
    let tenths = (value * 10.0).round() as i64;
    let sign = if tenths < 0 { "-" } else { "" };
    let tenths = tenths.unsigned_abs();
    format!("{}{}{}{}%", sign, tenths / 10, decimal_sep, tenths % 10)
}

/// Short label for a chart axis: `950`, `1.5K`, `2M`, `1.2B`.
pub fn format_compact(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let units = cents.unsigned_abs() as f64 / 100.0;

    let (scaled, suffix) = if units >= 1e9 {
        (units / 1e9, "B")
    } else if units >= 1e6 {
        (units / 1e6, "M")
    } else if units >= 1e3 {
        (units / 1e3, "K")
    } else {
        return format!("{}{}", sign, units.round() as u64);
    };

    let rounded = (scaled * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}{}{}", sign, rounded as u64, suffix)
    } else {
        format!("{}{:.1}{}", sign, rounded, suffix)
    }
}

/// Upper-case the first letter of every space-separated word.
pub fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, appending `...` if anything was cut.
pub fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept)
}

fn has_minor_units(currency: &str) -> bool {
    !matches!(
        currency.to_uppercase().as_str(),
        "IDR" | "JPY" | "KRW" | "VND"
    )
}

/// Get thousands and decimal separators based on locale.
fn locale_separators(locale: &str) -> (char, char) {
    match locale {
        "de-DE" | "de-AT" | "fr-FR" | "es-ES" | "it-IT" | "pt-BR" | "pt-PT" | "nl-NL"
        | "tr-TR" | "vi-VN" | "id-ID" | "da-DK" => ('.', ','),
        _ => (',', '.'),
    }
}

fn format_with_thousands(n: u64, sep: char) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    result
}

fn currency_symbol(currency: &str) -> &'static str {
    match currency.to_uppercase().as_str() {
        "IDR" => "Rp\u{00a0}",
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{00a3}",
        "JPY" => "\u{00a5}",
        "KRW" => "\u{20a9}",
        "VND" => "\u{20ab}",
        "SGD" => "S$",
        "MYR" => "RM",
        "AUD" => "A$",
        _ => "",
    }
}
