//! HTTP route dispatcher.
//!
//! Routes:
//! - OPTIONS /list, /notes - CORS preflight
//! - GET /list, /notes - List records, or fetch one with `?id=`
//! - POST /list, /notes - Create a record from `{"name": ...}`
//! - DELETE /list, /notes - Delete the record given by `?id=`

use tracing::{info, warn};
use validator::Validate;

use crate::config::Config;
use crate::http::{ApiGatewayRequest, ApiGatewayResponse};
use crate::models::{Collection, CreateRecordRequest};
use crate::records;
use crate::store::RecordStore;
use crate::{Error, Result};

/// Dispatch an API Gateway proxy request to the record store adapter.
pub async fn handle_api_request(
    config: &Config,
    store: &dyn RecordStore,
    request: &ApiGatewayRequest,
) -> Result<ApiGatewayResponse> {
    let resource = request.resource.as_deref().unwrap_or("");
    let method = request.method();

    info!("Received request: method={}, resource={}", method, resource);

    let Some(collection) = Collection::from_resource(resource) else {
        warn!("No route for resource {:?}", resource);
        let err = Error::NotFound(format!("resource {}", resource));
        return Ok(ApiGatewayResponse::from_error(&err));
    };
    let table = config.table_for(collection);

    match method {
        "OPTIONS" => Ok(ApiGatewayResponse::message(200, "CORS preflight")),
        "GET" => match request.query_id() {
            Some(id) => records::read_one(store, table, id).await,
            None => records::read_all(store, table).await,
        },
        "POST" => match parse_create_request(request) {
            Ok(body) => records::create(store, table, &body.name).await,
            Err(err) => {
                warn!("Rejected create request: {}", err);
                Ok(ApiGatewayResponse::from_error(&err))
            }
        },
        "DELETE" => match request.query_id() {
            Some(id) => records::delete(store, table, id).await,
            None => Ok(ApiGatewayResponse::from_error(&Error::Validation(
                "Missing id".to_string(),
            ))),
        },
        _ => Ok(ApiGatewayResponse::method_not_allowed()),
    }
}

/// Parse and validate a create body.
fn parse_create_request(request: &ApiGatewayRequest) -> Result<CreateRecordRequest> {
    if request.is_base64_encoded.unwrap_or(false) {
        return Err(Error::Validation(
            "Binary request bodies are not supported".to_string(),
        ));
    }

    let body = match request.body.as_deref() {
        Some(body) if !body.trim().is_empty() => body,
        _ => return Err(Error::Validation("Missing request body".to_string())),
    };

    let parsed: CreateRecordRequest = serde_json::from_str(body)
        .map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))?;

    parsed
        .validate()
        .map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))?;

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::records::tests::FailingStore;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn request(
        resource: &str,
        method: &str,
        id: Option<&str>,
        body: Option<&str>,
    ) -> ApiGatewayRequest {
        serde_json::from_value(json!({
            "resource": resource,
            "requestContext": { "httpMethod": method },
            "queryStringParameters": id.map(|id| json!({ "id": id })),
            "body": body,
        }))
        .unwrap()
    }

    async fn call(store: &dyn RecordStore, request: ApiGatewayRequest) -> ApiGatewayResponse {
        handle_api_request(&Config::default(), store, &request)
            .await
            .unwrap()
    }

    fn message(response: &ApiGatewayResponse) -> String {
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        body["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_list_round_trip_scenario() {
        let store = InMemoryStore::new();

        let body = r#"{"name":"milk"}"#;
        let created = call(&store, request("/list", "POST", None, Some(body))).await;
        assert_eq!(created.status_code, 201);
        let record: Record = serde_json::from_str(&created.body).unwrap();
        assert_eq!(record.name, "milk");

        let fetched = call(&store, request("/list", "GET", Some(&record.id), None)).await;
        assert_eq!(fetched.status_code, 200);
        assert_eq!(serde_json::from_str::<Record>(&fetched.body).unwrap(), record);

        let deleted = call(&store, request("/list", "DELETE", Some(&record.id), None)).await;
        assert_eq!(deleted.status_code, 200);

        let gone = call(&store, request("/list", "GET", Some(&record.id), None)).await;
        assert_eq!(gone.status_code, 200);
        assert_eq!(gone.body, "null");
    }

    #[tokio::test]
    async fn test_collections_are_separate_tables() {
        let store = InMemoryStore::new();

        call(&store, request("/notes", "POST", None, Some(r#"{"name":"call mum"}"#))).await;

        assert_eq!(store.scan("notes_db").await.unwrap().len(), 1);
        assert!(store.scan("todo_list_db").await.unwrap().is_empty());

        let listed = call(&store, request("/list", "GET", None, None)).await;
        assert_eq!(listed.body, "[]");
    }

    #[tokio::test]
    async fn test_options_ignores_body_and_query() {
        for resource in ["/list", "/notes"] {
            let response = call(
                &FailingStore,
                request(resource, "OPTIONS", Some("x"), Some("not json")),
            )
            .await;
            assert_eq!(response.status_code, 200);
            assert_eq!(message(&response), "CORS preflight");
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        }
    }

    #[tokio::test]
    async fn test_post_without_name_is_rejected() {
        let store = InMemoryStore::new();

        for body in [Some(r#"{"title":"milk"}"#), Some(r#"{"name":""}"#), Some("{"), None] {
            let response = call(&store, request("/list", "POST", None, body)).await;
            assert_eq!(response.status_code, 400, "body {:?}", body);
            assert!(message(&response).starts_with("Validation error:"));
        }
        assert!(store.scan("todo_list_db").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_id_is_rejected() {
        let response = call(&InMemoryStore::new(), request("/notes", "DELETE", None, None)).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(message(&response), "Validation error: Missing id");
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let response = call(&InMemoryStore::new(), request("/list", "PUT", None, None)).await;
        assert_eq!(response.status_code, 405);
        assert_eq!(message(&response), "Method not allowed");
    }

    #[tokio::test]
    async fn test_unknown_resource_is_404() {
        let response = call(&InMemoryStore::new(), request("/todos", "GET", None, None)).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(message(&response), "Not found: resource /todos");
    }

    #[tokio::test]
    async fn test_store_failure_is_500() {
        let response = call(&FailingStore, request("/list", "GET", None, None)).await;
        assert_eq!(response.status_code, 500);
    }

    #[tokio::test]
    async fn test_base64_body_is_rejected() {
        let mut req = request("/list", "POST", None, Some("eyJuYW1lIjoibWlsayJ9"));
        req.is_base64_encoded = Some(true);
        let response = call(&InMemoryStore::new(), req).await;
        assert_eq!(response.status_code, 400);
    }
}
