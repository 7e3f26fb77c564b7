use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, FieldErrors};
use crate::storage::Credentials;
use crate::transport::{ApiRequest, Body, FormPart, Method, Transport};

type SessionEndedHook = Arc<dyn Fn() + Send + Sync>;

/// The single configured client every page goes through.
///
/// Attaches the persisted bearer credential to each request, targets one
/// base URL, decodes error bodies into [`FieldErrors`], and turns a 401 on
/// an authenticated request into [`ApiError::SessionExpired`] after
/// clearing the credential and firing the session-ended hook.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    on_session_ended: Arc<Mutex<Option<SessionEndedHook>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            credentials,
            on_session_ended: Arc::new(Mutex::new(None)),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register what happens when the server rejects our credential.
    /// Replaces any previous hook.
    pub fn on_session_ended(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.on_session_ended.lock() {
            *slot = Some(Arc::new(hook));
        }
    }

    /// Absolute URL for an API path such as `/trabalhos/12/`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Absolute URL with query parameters; empty values are left out.
    pub fn url_with_query(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ApiError::Decode(format!("Invalid URL for '{}': {}", path, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter().filter(|(_, v)| !v.trim().is_empty()) {
                pairs.append_pair(key, value.trim());
            }
        }
        let mut rendered = url.to_string();
        if rendered.ends_with('?') {
            rendered.pop();
        }
        Ok(rendered)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let body = self.execute(Method::Get, url, Body::Empty).await?;
        decode(&body)
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url_with_query(path, query)?;
        let body = self.execute(Method::Get, url, Body::Empty).await?;
        decode(&body)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T, ApiError> {
        let body = self.execute(Method::Post, self.url(path), json_body(payload)?).await?;
        decode(&body)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T, ApiError> {
        let body = self.execute(Method::Patch, self.url(path), json_body(payload)?).await?;
        decode(&body)
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, parts: Vec<FormPart>) -> Result<T, ApiError> {
        let body = self.execute(Method::Post, self.url(path), Body::Multipart(parts)).await?;
        decode(&body)
    }

    pub async fn patch_multipart<T: DeserializeOwned>(&self, path: &str, parts: Vec<FormPart>) -> Result<T, ApiError> {
        let body = self.execute(Method::Patch, self.url(path), Body::Multipart(parts)).await?;
        decode(&body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::Delete, self.url(path), Body::Empty).await?;
        Ok(())
    }

    async fn execute(&self, method: Method, url: String, body: Body) -> Result<String, ApiError> {
        let bearer = self.credentials.access_token();
        let authenticated = bearer.is_some();
        debug!("{} {} (authenticated: {})", method.as_str(), url, authenticated);

        let response = self
            .transport
            .send(ApiRequest {
                method,
                url: url.clone(),
                bearer,
                body,
            })
            .await?;

        if response.is_success() {
            return Ok(response.body);
        }

        if response.status == 401 && authenticated {
            warn!("{} {} returned 401, ending session", method.as_str(), url);
            self.credentials.clear();
            self.fire_session_ended();
            return Err(ApiError::SessionExpired);
        }

        let errors = FieldErrors::from_body(&response.body);
        warn!(
            "{} {} failed with {}: {}",
            method.as_str(),
            url,
            response.status,
            errors.summary().unwrap_or_default()
        );
        Err(ApiError::Rejected {
            status: response.status,
            errors,
        })
    }

    fn fire_session_ended(&self) {
        let hook = match self.on_session_ended.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        if let Some(hook) = hook {
            hook();
        }
    }
}

fn json_body<B: Serialize>(payload: &B) -> Result<Body, ApiError> {
    serde_json::to_value(payload)
        .map(Body::Json)
        .map_err(|e| ApiError::Decode(format!("Failed to encode request: {}", e)))
}

/// Empty bodies (204) decode as JSON `null`, so `()` and `Option<_>` targets work.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let raw = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ReqwestTransport;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Arc::new(ReqwestTransport::new()), Credentials::in_memory())
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let c = client("http://localhost:8000/api/");
        assert_eq!(c.base_url(), "http://localhost:8000/api");
        assert_eq!(c.url("/trabalhos/"), "http://localhost:8000/api/trabalhos/");
        assert_eq!(c.url("token/"), "http://localhost:8000/api/token/");
    }

    #[test]
    fn test_url_with_query_skips_blank_values() {
        let c = client("http://localhost:8000/api");
        let url = c
            .url_with_query(
                "/denuncias/",
                &[("status", "pendente".to_string()), ("tipo", "  ".to_string())],
            )
            .unwrap();
        assert_eq!(url, "http://localhost:8000/api/denuncias/?status=pendente");

        let bare = c.url_with_query("/denuncias/", &[("tipo", String::new())]).unwrap();
        assert_eq!(bare, "http://localhost:8000/api/denuncias/");
    }

    #[test]
    fn test_url_with_query_encodes_search_text() {
        let c = client("http://localhost:8000/api");
        let url = c
            .url_with_query("/trabalhos/", &[("search", "logo & site".to_string())])
            .unwrap();
        assert_eq!(url, "http://localhost:8000/api/trabalhos/?search=logo+%26+site");
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        assert!(decode::<()>("").is_ok());
        assert_eq!(decode::<Option<i64>>("  ").unwrap(), None);
        assert!(matches!(decode::<i64>("oops"), Err(ApiError::Decode(_))));
    }
}
