//! Entry point router.
//!
//! One Lambda serves both the Alexa skill and the API Gateway proxy
//! integration. Events carrying a top-level `request` object are voice
//! requests; everything else is treated as an HTTP event.

use serde_json::Value;
use tracing::{debug, warn};

use crate::alexa::{handle_alexa_request, AlexaRequest};
use crate::api::handle_api_request;
use crate::config::Config;
use crate::http::{ApiGatewayRequest, ApiGatewayResponse};
use crate::store::RecordStore;
use crate::Result;

/// Whether a raw event came from the voice platform.
pub fn is_voice_event(event: &Value) -> bool {
    event.get("request").is_some_and(|r| !r.is_null())
}

/// Route a raw Lambda event and return the JSON payload to hand back.
pub async fn handle_event(config: &Config, store: &dyn RecordStore, event: Value) -> Result<Value> {
    debug!("Received event: {}", event);

    if is_voice_event(&event) {
        let request: AlexaRequest = match serde_json::from_value(event) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to parse voice request: {}", e);
                let response = ApiGatewayResponse::message(400, format!("Invalid request: {}", e));
                return Ok(serde_json::to_value(response)?);
            }
        };
        let response = handle_alexa_request(config, store, &request).await;
        return Ok(serde_json::to_value(response)?);
    }

    let request: ApiGatewayRequest = match serde_json::from_value(event) {
        Ok(request) => request,
        Err(e) => {
            warn!("Failed to parse API Gateway request: {}", e);
            let response = ApiGatewayResponse::message(400, format!("Invalid request: {}", e));
            return Ok(serde_json::to_value(response)?);
        }
    };
    let response = handle_api_request(config, store, &request).await?;
    Ok(serde_json::to_value(response)?)
}
