//! API Gateway proxy event and response shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// CORS headers attached to every HTTP response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ("Access-Control-Allow-Methods", "OPTIONS,GET,POST,PUT,DELETE"),
];

/// API Gateway proxy request (REST API, payload format 1.0).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    pub resource: Option<String>,
    pub request_context: Option<RequestContext>,
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    pub body: Option<String>,
    pub is_base64_encoded: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub http_method: String,
}

impl ApiGatewayRequest {
    pub fn method(&self) -> &str {
        self.request_context
            .as_ref()
            .map(|ctx| ctx.http_method.as_str())
            .unwrap_or("")
    }

    /// The `id` query parameter, treating an empty value as absent.
    pub fn query_id(&self) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// API Gateway proxy response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiGatewayResponse {
    pub fn new(status_code: u16, body: String) -> Self {
        let mut headers: BTreeMap<String, String> = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    /// JSON response with the given status code and data.
    pub fn json<T: Serialize>(status_code: u16, data: &T) -> Result<Self> {
        Ok(Self::new(status_code, serde_json::to_string(data)?))
    }

    /// `{"message": ...}` response.
    pub fn message(status_code: u16, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "message": message.into() });
        Self::new(status_code, body.to_string())
    }

    /// Error response carrying the error's status code and display text.
    pub fn from_error(err: &Error) -> Self {
        Self::message(err.status_code(), err.to_string())
    }

    pub fn method_not_allowed() -> Self {
        Self::message(405, "Method not allowed")
    }
}
