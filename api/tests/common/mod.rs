#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use freela_api::transport::{ApiRequest, ApiResponse, Method};
use freela_api::{ApiClient, ApiError, Credentials, Transport};

/// Answers requests from a queue of canned responses and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn respond_empty(&self, status: u16) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: String::new(),
        }));
        self
    }

    pub fn fail_network(&self) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network("connection refused".into())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn sent(&self, method: Method, path: &str) -> bool {
        self.requests()
            .iter()
            .any(|r| r.method == method && r.url.ends_with(path))
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("No scripted response for {} {}", request.method.as_str(), request.url))
    }
}

pub const BASE: &str = "http://api.test/api";

pub fn client_with(transport: Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::new(BASE, transport, Credentials::in_memory())
}

pub fn user_json(id: i64, tipo: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "nome": format!("Usuário {}", id),
        "email": format!("u{}@example.com", id),
        "tipo": tipo,
    })
}

pub fn notification_json(id: i64, lida: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "mensagem": format!("Nova proposta #{}", id),
        "lida": lida,
    })
}
