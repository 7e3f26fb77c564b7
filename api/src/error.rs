use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when the server could not be reached or answered with something unreadable.
pub const FALLBACK_MESSAGE: &str = "Não foi possível conectar ao servidor. Tente novamente.";

/// Shown after a 401 on an authenticated request.
pub const SESSION_EXPIRED_MESSAGE: &str = "Sua sessão expirou. Faça login novamente.";

/// Keys whose messages belong to the page banner rather than to a form field.
const GENERAL_KEYS: &[&str] = &["detail", "non_field_errors"];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Request rejected with status {status}")]
    Rejected { status: u16, errors: FieldErrors },

    /// Client-side validation failed; no request was sent.
    #[error("Invalid input")]
    Invalid(FieldErrors),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Rejected { errors, .. } | ApiError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    /// First message attached to `field`, for inline display under an input.
    pub fn field(&self, field: &str) -> Option<String> {
        self.field_errors()
            .and_then(|errors| errors.first(field))
            .map(str::to_string)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Flat, displayable message for a page-level banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => FALLBACK_MESSAGE.to_string(),
            ApiError::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::Rejected { status, errors } => errors
                .summary()
                .unwrap_or_else(|| format!("Ocorreu um erro inesperado (código {}).", status)),
            ApiError::Invalid(errors) => errors
                .summary()
                .unwrap_or_else(|| "Verifique os campos do formulário.".to_string()),
            ApiError::Cancelled => String::new(),
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.user_message()
    }
}

/// Backend error payloads come in several shapes: a bare string, a list,
/// or an object whose values are strings, lists or further objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Message(String),
    List(Vec<ErrorPayload>),
    Object(BTreeMap<String, ErrorPayload>),
    Other(serde_json::Value),
}

impl ErrorPayload {
    fn collect_messages(self, out: &mut Vec<String>) {
        match self {
            ErrorPayload::Message(msg) => out.push(msg),
            ErrorPayload::List(items) => {
                for item in items {
                    item.collect_messages(out);
                }
            }
            ErrorPayload::Object(map) => {
                for (_, value) in map {
                    value.collect_messages(out);
                }
            }
            ErrorPayload::Other(serde_json::Value::Null) => {}
            ErrorPayload::Other(value) => out.push(value.to_string()),
        }
    }
}

/// Normalized validation errors: messages keyed by field plus page-level messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
    general: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn general_message(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: vec![message.into()],
        }
    }

    /// Decode a raw response body. Bodies that are not JSON yield no messages.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorPayload>(body) {
            Ok(payload) => Self::from_payload(payload),
            Err(_) => Self::new(),
        }
    }

    fn from_payload(payload: ErrorPayload) -> Self {
        let mut errors = Self::new();
        match payload {
            ErrorPayload::Object(map) => errors.absorb_object("", map),
            other => other.collect_messages(&mut errors.general),
        }
        errors
    }

    fn absorb_object(&mut self, prefix: &str, map: BTreeMap<String, ErrorPayload>) {
        for (key, value) in map {
            if prefix.is_empty() && GENERAL_KEYS.contains(&key.as_str()) {
                value.collect_messages(&mut self.general);
                continue;
            }
            let path = if prefix.is_empty() {
                key
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                ErrorPayload::Object(inner) => self.absorb_object(&path, inner),
                other => {
                    let mut messages = Vec::new();
                    other.collect_messages(&mut messages);
                    if !messages.is_empty() {
                        self.fields.entry(path).or_default().extend(messages);
                    }
                }
            }
        }
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn general(&self) -> &[String] {
        &self.general
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// One line for a banner: general messages if any, otherwise every field message.
    pub fn summary(&self) -> Option<String> {
        if !self.general.is_empty() {
            return Some(self.general.join(" "));
        }
        let all: Vec<&str> = self
            .fields
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        if all.is_empty() {
            None
        } else {
            Some(all.join(" "))
        }
    }

    /// `Ok(())` when nothing was recorded, for validators that accumulate.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Invalid setting '{0}': must be greater than zero")]
    NonPositive(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keyed_arrays() {
        let errors = FieldErrors::from_body(r#"{"email": ["Já existe um usuário com este e-mail."]}"#);
        assert_eq!(errors.first("email"), Some("Já existe um usuário com este e-mail."));
        assert!(errors.general().is_empty());
    }

    #[test]
    fn test_field_keyed_plain_string() {
        let errors = FieldErrors::from_body(r#"{"orcamento": "Valor inválido."}"#);
        assert_eq!(errors.messages("orcamento"), ["Valor inválido.".to_string()]);
    }

    #[test]
    fn test_detail_goes_to_general() {
        let errors = FieldErrors::from_body(r#"{"detail": "Você não tem permissão."}"#);
        assert_eq!(errors.general(), ["Você não tem permissão.".to_string()]);
        assert_eq!(errors.summary().as_deref(), Some("Você não tem permissão."));
    }

    #[test]
    fn test_non_field_errors_go_to_general() {
        let errors = FieldErrors::from_body(
            r#"{"non_field_errors": ["Proposta já enviada."], "valor": ["Obrigatório."]}"#,
        );
        assert_eq!(errors.general(), ["Proposta já enviada.".to_string()]);
        assert_eq!(errors.first("valor"), Some("Obrigatório."));
        // general wins the banner
        assert_eq!(errors.summary().as_deref(), Some("Proposta já enviada."));
    }

    #[test]
    fn test_nested_objects_flatten_with_dotted_path() {
        let errors = FieldErrors::from_body(r#"{"endereco": {"cep": ["CEP inválido."]}}"#);
        assert_eq!(errors.first("endereco.cep"), Some("CEP inválido."));
    }

    #[test]
    fn test_top_level_string_and_array() {
        assert_eq!(
            FieldErrors::from_body(r#""Erro interno""#).general(),
            ["Erro interno".to_string()]
        );
        assert_eq!(
            FieldErrors::from_body(r#"["a", ["b"]]"#).general(),
            ["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_non_json_body_is_empty() {
        assert!(FieldErrors::from_body("<html>502 Bad Gateway</html>").is_empty());
        assert!(FieldErrors::from_body("").is_empty());
    }

    #[test]
    fn test_summary_joins_field_messages_without_general() {
        let mut errors = FieldErrors::new();
        errors.insert("nome", "Informe o nome.");
        errors.insert("email", "Informe o e-mail.");
        // BTreeMap order: email before nome
        assert_eq!(
            errors.summary().as_deref(),
            Some("Informe o e-mail. Informe o nome.")
        );
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(ApiError::Network("refused".into()).user_message(), FALLBACK_MESSAGE);
        assert_eq!(ApiError::SessionExpired.user_message(), SESSION_EXPIRED_MESSAGE);
        let rejected = ApiError::Rejected {
            status: 500,
            errors: FieldErrors::new(),
        };
        assert!(rejected.user_message().contains("500"));
    }

    #[test]
    fn test_field_lookup_through_error() {
        let err = ApiError::Invalid(FieldErrors::single("nota", "Escolha uma nota de 1 a 5."));
        assert_eq!(err.field("nota").as_deref(), Some("Escolha uma nota de 1 a 5."));
        assert_eq!(err.field("comentario"), None);
    }
}
