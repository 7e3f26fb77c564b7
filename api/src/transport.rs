use async_trait::async_trait;
use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(Attachment),
}

/// A file picked in a form, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(name: &str, attachment: Attachment) -> Self {
        Self {
            name: name.to_string(),
            value: PartValue::File(attachment),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer credential, attached as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
/// Non-2xx statuses are responses, not errors; only failing to get an
/// answer at all is an `Err`.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest` transport: the browser `fetch` on wasm32, hyper natively.
/// No timeout and no retry are configured.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File(attachment) => {
                let mut file_part = reqwest::multipart::Part::bytes(attachment.bytes)
                    .file_name(attachment.file_name);
                if let Some(mime) = attachment.mime.filter(|m| !m.is_empty()) {
                    file_part = file_part
                        .mime_str(&mime)
                        .map_err(|e| ApiError::Decode(format!("Invalid MIME type '{}': {}", mime, e)))?;
                }
                form.part(part.name, file_part)
            }
        };
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", request.url, e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse { status: 200, body: String::new() }.is_success());
        assert!(ApiResponse { status: 204, body: String::new() }.is_success());
        assert!(!ApiResponse { status: 400, body: String::new() }.is_success());
        assert!(!ApiResponse { status: 302, body: String::new() }.is_success());
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let parts = vec![FormPart::file(
            "anexo",
            Attachment {
                file_name: "briefing.pdf".into(),
                mime: Some("not a mime".into()),
                bytes: vec![1, 2, 3],
            },
        )];
        assert!(matches!(build_form(parts), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_build_form_accepts_text_and_file() {
        let parts = vec![
            FormPart::text("titulo", "Logo"),
            FormPart::file(
                "anexo",
                Attachment {
                    file_name: "logo.png".into(),
                    mime: Some("image/png".into()),
                    bytes: vec![0x89, 0x50],
                },
            ),
        ];
        assert!(build_form(parts).is_ok());
    }
}
