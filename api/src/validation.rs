//! Client-side checks run before a form is submitted. A failing check
//! means no request is sent; the messages are shown inline per field.

use chrono::NaiveDate;

use crate::error::FieldErrors;

pub const INVALID_BUDGET_MESSAGE: &str = "Informe um orçamento válido (maior que zero).";
pub const INVALID_VALUE_MESSAGE: &str = "Informe um valor válido (maior que zero).";
pub const REJECTION_REASON_MIN_CHARS: usize = 20;
pub const REJECTION_REASON_MESSAGE: &str =
    "Explique o motivo da recusa com pelo menos 20 caracteres.";
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Parse a money amount typed by a person: "1500", "1500.50", "1.500,50",
/// "1.500", "R$ 80".
pub fn parse_money(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') {
        // Brazilian format: dots group thousands, comma marks decimals.
        cleaned.replace('.', "").replace(',', ".")
    } else if is_dot_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// "1.500" or "1.500.000": a 1-3 digit lead group followed by whole groups of three.
fn is_dot_grouped(raw: &str) -> bool {
    let mut groups = raw.split('.');
    let lead_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    let mut rest = 0;
    let rest_ok = groups.all(|g| {
        rest += 1;
        g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())
    });
    lead_ok && rest_ok && rest > 0
}

/// A strictly positive amount, or `message` under `field`.
pub fn positive_amount(errors: &mut FieldErrors, field: &str, raw: &str, message: &str) -> Option<f64> {
    match parse_money(raw) {
        Some(value) if value > 0.0 => Some(value),
        _ => {
            errors.insert(field, message);
            None
        }
    }
}

pub fn required(errors: &mut FieldErrors, field: &str, raw: &str, message: &str) {
    if raw.trim().is_empty() {
        errors.insert(field, message);
    }
}

pub fn min_chars(errors: &mut FieldErrors, field: &str, raw: &str, min: usize, message: &str) {
    if raw.trim().chars().count() < min {
        errors.insert(field, message);
    }
}

pub fn looks_like_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !raw.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub fn email(errors: &mut FieldErrors, field: &str, raw: &str) {
    if raw.trim().is_empty() {
        errors.insert(field, "Informe o e-mail.");
    } else if !looks_like_email(raw) {
        errors.insert(field, "Informe um e-mail válido.");
    }
}

/// New password rules shared by registration and password change.
pub fn new_password(errors: &mut FieldErrors, field: &str, password: &str, confirmation_field: &str, confirmation: &str) {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        errors.insert(field, "A senha deve ter pelo menos 8 caracteres.");
    }
    if password != confirmation {
        errors.insert(confirmation_field, "As senhas não coincidem.");
    }
}

/// A `YYYY-MM-DD` date from an `<input type="date">`, not before `today`.
pub fn future_date(errors: &mut FieldErrors, field: &str, raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(field, "Informe o prazo.");
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) if date >= today => Some(date),
        Ok(_) => {
            errors.insert(field, "O prazo não pode estar no passado.");
            None
        }
        Err(_) => {
            errors.insert(field, "Informe uma data válida.");
            None
        }
    }
}

/// Reason for rejecting a proposal; trimmed text of at least 20 characters.
pub fn rejection_reason(raw: &str) -> Result<String, FieldErrors> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < REJECTION_REASON_MIN_CHARS {
        return Err(FieldErrors::single("motivo_recusa", REJECTION_REASON_MESSAGE));
    }
    Ok(trimmed.to_string())
}

pub fn rating_score(score: u8) -> Result<u8, FieldErrors> {
    if (1..=5).contains(&score) {
        Ok(score)
    } else {
        Err(FieldErrors::single("nota", "Escolha uma nota de 1 a 5."))
    }
}

/// Comma-separated skills into a clean list, duplicates removed, order kept.
pub fn split_skills(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            skills.push(skill.to_string());
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_formats() {
        assert_eq!(parse_money("1500"), Some(1500.0));
        assert_eq!(parse_money("1500.50"), Some(1500.5));
        assert_eq!(parse_money("1.500,50"), Some(1500.5));
        assert_eq!(parse_money("R$ 80"), Some(80.0));
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money("inf"), None);
    }

    #[test]
    fn test_parse_money_dot_grouped_thousands() {
        assert_eq!(parse_money("1.500"), Some(1500.0));
        assert_eq!(parse_money("1.500.000"), Some(1500000.0));
        assert_eq!(parse_money("R$ 12.000"), Some(12000.0));
        // not whole groups of three: a decimal point
        assert_eq!(parse_money("1.50"), Some(1.5));
        assert_eq!(parse_money("1500.500"), Some(1500.5));
        assert_eq!(parse_money("1.5000"), Some(1.5));
    }

    #[test]
    fn test_positive_amount_rejects_zero_and_negative() {
        for raw in ["0", "-10", "0,00", ""] {
            let mut errors = FieldErrors::new();
            assert_eq!(positive_amount(&mut errors, "orcamento", raw, INVALID_BUDGET_MESSAGE), None);
            assert_eq!(errors.first("orcamento"), Some(INVALID_BUDGET_MESSAGE), "input {:?}", raw);
        }
        let mut errors = FieldErrors::new();
        assert_eq!(positive_amount(&mut errors, "orcamento", "0.01", INVALID_BUDGET_MESSAGE), Some(0.01));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_rejection_reason_needs_twenty_chars() {
        assert!(rejection_reason("curto demais").is_err());
        // 19 chars padded with whitespace is still too short
        assert!(rejection_reason("   1234567890123456789   ").is_err());
        let ok = rejection_reason("  O prazo proposto não atende.  ").unwrap();
        assert_eq!(ok, "O prazo proposto não atende.");
        let err = rejection_reason("").unwrap_err();
        assert_eq!(err.first("motivo_recusa"), Some(REJECTION_REASON_MESSAGE));
    }

    #[test]
    fn test_rejection_reason_counts_characters_not_bytes() {
        // 21 two-byte characters; dropping the last leaves exactly 20
        let reason = "ããããããããããããããããããããã";
        assert!(rejection_reason(&reason[..reason.len() - 2]).is_ok());
        assert!(rejection_reason("ããããããããããããããããããã").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("ana@example.com"));
        assert!(!looks_like_email("ana@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ana example@x.com"));
        assert!(!looks_like_email("ana@.com"));
    }

    #[test]
    fn test_new_password_rules() {
        let mut errors = FieldErrors::new();
        new_password(&mut errors, "password", "curta", "password_confirm", "curtaa");
        assert!(errors.first("password").is_some());
        assert_eq!(errors.first("password_confirm"), Some("As senhas não coincidem."));

        let mut errors = FieldErrors::new();
        new_password(&mut errors, "password", "segura123", "password_confirm", "segura123");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_future_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let mut errors = FieldErrors::new();
        assert_eq!(
            future_date(&mut errors, "prazo", "2026-03-10", today),
            Some(today)
        );
        assert!(future_date(&mut errors, "prazo", "2026-03-09", today).is_none());
        assert_eq!(errors.first("prazo"), Some("O prazo não pode estar no passado."));
        let mut errors = FieldErrors::new();
        assert!(future_date(&mut errors, "prazo", "10/03/2026", today).is_none());
        assert_eq!(errors.first("prazo"), Some("Informe uma data válida."));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(rating_score(0).is_err());
        assert_eq!(rating_score(1), Ok(1));
        assert_eq!(rating_score(5), Ok(5));
        assert!(rating_score(6).is_err());
    }

    #[test]
    fn test_split_skills() {
        assert_eq!(
            split_skills(" Rust, design ,, rust,SQL "),
            vec!["Rust".to_string(), "design".to_string(), "SQL".to_string()]
        );
    }
}
