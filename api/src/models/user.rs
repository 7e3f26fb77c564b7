use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Cliente,
    Freelancer,
    Admin,
}

impl UserKind {
    pub fn label(self) -> &'static str {
        match self {
            UserKind::Cliente => "Cliente",
            UserKind::Freelancer => "Freelancer",
            UserKind::Admin => "Administrador",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub tipo: UserKind,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub habilidades: Vec<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub advertencias: u32,
    #[serde(default)]
    pub suspenso_ate: Option<DateTime<Utc>>,
    #[serde(default)]
    pub banido: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.tipo == UserKind::Admin
    }

    pub fn is_client(&self) -> bool {
        self.tipo == UserKind::Cliente
    }

    pub fn is_freelancer(&self) -> bool {
        self.tipo == UserKind::Freelancer
    }

    pub fn is_suspended_at(&self, now: DateTime<Utc>) -> bool {
        self.suspenso_ate.is_some_and(|until| until > now)
    }
}

/// Response of `POST /token/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user_json(extra: &str) -> String {
        format!(
            r#"{{"id": 7, "nome": "Ana", "email": "ana@example.com", "tipo": "freelancer"{}}}"#,
            extra
        )
    }

    #[test]
    fn test_minimal_user_decodes_with_defaults() {
        let user: User = serde_json::from_str(&user_json("")).unwrap();
        assert_eq!(user.tipo, UserKind::Freelancer);
        assert!(user.habilidades.is_empty());
        assert!(!user.is_admin());
        assert!(user.is_freelancer());
    }

    #[test]
    fn test_staff_flag_makes_admin() {
        let user: User = serde_json::from_str(&user_json(r#", "is_staff": true"#)).unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn test_suspension_window() {
        let user: User =
            serde_json::from_str(&user_json(r#", "suspenso_ate": "2026-01-10T00:00:00Z""#))
                .unwrap();
        let before = Utc.with_ymd_and_hms(2026, 1, 9, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap();
        assert!(user.is_suspended_at(before));
        assert!(!user.is_suspended_at(after));
    }
}
