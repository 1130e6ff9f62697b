//! Shared library for the list and notes Lambda.
//!
//! Routes Alexa intents and API Gateway requests onto a small record store.

pub mod alexa;
pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod records;
pub mod router;
pub mod store;

pub use alexa::{AlexaRequest, AlexaResponse, VoiceResponse};
pub use config::Config;
pub use error::{Error, Result};
pub use http::{ApiGatewayRequest, ApiGatewayResponse};
pub use models::{Collection, Record};
pub use router::handle_event;
pub use store::{DynamoDbStore, InMemoryStore, RecordStore};
