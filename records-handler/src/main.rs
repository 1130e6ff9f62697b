//! Records Lambda - Serves the Alexa skill and the /list and /notes API.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::{Config, DynamoDbStore, RecordStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state, built once per process and reused across invocations.
struct AppState {
    config: Config,
    store: Arc<dyn RecordStore>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;
        let store = DynamoDbStore::new(aws_sdk_dynamodb::Client::new(&sdk_config));

        info!(
            "Using tables list={} notes={}",
            config.list_table, config.notes_table
        );

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }
}

async fn handler(state: Arc<AppState>, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (payload, _context) = event.into_parts();
    Ok(shared::handle_event(&state.config, state.store.as_ref(), payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    lambda_runtime::run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
