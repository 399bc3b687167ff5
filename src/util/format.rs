//! Display formatting for marketplace values (pt-BR conventions).

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::ProfessionalCard;

/// `15000` → `"R$ 150,00"`, with `.` as the thousands separator.
pub fn format_price_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let reais = abs / 100;
    let centavos = abs % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}R$ {grouped},{centavos:02}")
}

/// `"Recife - PE"`, `"Recife"`, or empty.
pub fn format_location(card: &ProfessionalCard) -> String {
    let city = card.city.as_deref().unwrap_or_default().trim();
    match card.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(state) if !city.is_empty() => format!("{city} - {state}"),
        Some(state) => state.to_owned(),
        None => city.to_owned(),
    }
}

/// One decimal place, e.g. `"⭐ 4.8"`. Zero/absent ratings are hidden.
pub fn format_rating(rating: Option<f64>) -> Option<String> {
    rating.filter(|r| *r > 0.0).map(|r| format!("⭐ {r:.1}"))
}

/// `wa.me` link from a free-form phone number, if it has any digits.
pub fn whatsapp_link(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
}

/// `"Psicólogo(a) Ana Souza"`.
pub fn display_title(card: &ProfessionalCard) -> String {
    format!("{} {}", card.profession.title(), card.full_name)
}
