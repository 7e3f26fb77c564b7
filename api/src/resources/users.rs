use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors};
use crate::models::{User, UserKind};
use crate::validation;

/// Sign-up form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub nome: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub tipo: Option<UserKind>,
    pub telefone: String,
}

#[derive(Debug, Serialize)]
struct RegistrationPayload<'a> {
    nome: &'a str,
    email: &'a str,
    password: &'a str,
    tipo: UserKind,
    #[serde(skip_serializing_if = "str::is_empty")]
    telefone: &'a str,
}

impl Registration {
    pub fn validate(&self) -> Result<UserKind, FieldErrors> {
        let mut errors = FieldErrors::new();
        validation::required(&mut errors, "nome", &self.nome, "Informe o nome.");
        validation::email(&mut errors, "email", &self.email);
        validation::new_password(
            &mut errors,
            "password",
            &self.password,
            "password_confirm",
            &self.password_confirm,
        );
        let tipo = match self.tipo {
            Some(UserKind::Admin) | None => {
                errors.insert("tipo", "Escolha entre cliente e freelancer.");
                None
            }
            Some(kind) => Some(kind),
        };
        errors.into_result()?;
        tipo.ok_or_else(|| FieldErrors::single("tipo", "Escolha entre cliente e freelancer."))
    }
}

/// `POST /usuarios/`
pub async fn register(client: &ApiClient, form: &Registration) -> Result<User, ApiError> {
    let tipo = form.validate().map_err(ApiError::Invalid)?;
    let user: User = client
        .post(
            "/usuarios/",
            &RegistrationPayload {
                nome: form.nome.trim(),
                email: form.email.trim(),
                password: &form.password,
                tipo,
                telefone: form.telefone.trim(),
            },
        )
        .await?;
    info!("Registered user {}", user.id);
    Ok(user)
}

/// `GET /usuarios/{id}/`
pub async fn get(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    client.get(&format!("/usuarios/{}/", id)).await
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub nome: String,
    pub telefone: String,
    pub bio: String,
    pub habilidades: String,
}

impl ProfileUpdate {
    pub fn from_user(user: &User) -> Self {
        Self {
            nome: user.nome.clone(),
            telefone: user.telefone.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
            habilidades: user.habilidades.join(", "),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProfilePayload<'a> {
    nome: &'a str,
    telefone: &'a str,
    bio: &'a str,
    habilidades: Vec<String>,
}

/// `PATCH /usuarios/{id}/`
pub async fn update_profile(client: &ApiClient, id: i64, form: &ProfileUpdate) -> Result<User, ApiError> {
    let mut errors = FieldErrors::new();
    validation::required(&mut errors, "nome", &form.nome, "Informe o nome.");
    errors.into_result().map_err(ApiError::Invalid)?;

    client
        .patch(
            &format!("/usuarios/{}/", id),
            &ProfilePayload {
                nome: form.nome.trim(),
                telefone: form.telefone.trim(),
                bio: form.bio.trim(),
                habilidades: validation::split_skills(&form.habilidades),
            },
        )
        .await
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

#[derive(Debug, Serialize)]
struct PasswordPayload<'a> {
    senha_atual: &'a str,
    nova_senha: &'a str,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validation::required(&mut errors, "senha_atual", &self.current, "Informe a senha atual.");
        validation::new_password(&mut errors, "nova_senha", &self.new, "confirmacao", &self.confirm);
        if !self.current.is_empty() && self.current == self.new {
            errors.insert("nova_senha", "A nova senha deve ser diferente da atual.");
        }
        errors.into_result()
    }
}

/// `POST /usuarios/{id}/alterar-senha/`
pub async fn change_password(client: &ApiClient, id: i64, form: &PasswordChange) -> Result<(), ApiError> {
    form.validate().map_err(ApiError::Invalid)?;
    client
        .post::<_, serde_json::Value>(
            &format!("/usuarios/{}/alterar-senha/", id),
            &PasswordPayload {
                senha_atual: &form.current,
                nova_senha: &form.new,
            },
        )
        .await?;
    info!("Password changed for user {}", id);
    Ok(())
}

/// `DELETE /usuarios/{id}/`
pub async fn delete_account(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/usuarios/{}/", id)).await?;
    info!("Deleted account {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> Registration {
        Registration {
            nome: "Dani".into(),
            email: "dani@example.com".into(),
            password: "segura123".into(),
            password_confirm: "segura123".into(),
            tipo: Some(UserKind::Freelancer),
            telefone: String::new(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert_eq!(valid_registration().validate(), Ok(UserKind::Freelancer));
    }

    #[test]
    fn test_registration_collects_every_field_error() {
        let form = Registration {
            tipo: None,
            email: "dani".into(),
            password_confirm: "outra".into(),
            ..valid_registration()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first("email"), Some("Informe um e-mail válido."));
        assert_eq!(errors.first("password_confirm"), Some("As senhas não coincidem."));
        assert!(errors.first("tipo").is_some());
        assert!(errors.first("nome").is_none());
    }

    #[test]
    fn test_registration_cannot_pick_admin() {
        let form = Registration {
            tipo: Some(UserKind::Admin),
            ..valid_registration()
        };
        assert!(form.validate().unwrap_err().first("tipo").is_some());
    }

    #[test]
    fn test_password_change_must_differ() {
        let form = PasswordChange {
            current: "segura123".into(),
            new: "segura123".into(),
            confirm: "segura123".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first("nova_senha"), Some("A nova senha deve ser diferente da atual."));
    }
}
