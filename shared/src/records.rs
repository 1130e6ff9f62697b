//! Record store adapter.
//!
//! Turns store calls into API Gateway response envelopes. Store failures are
//! logged and surfaced as 500s; nothing here retries.

use tracing::{error, info};

use crate::http::ApiGatewayResponse;
use crate::models::Record;
use crate::store::RecordStore;
use crate::{Error, Result};

/// Enumerate every record in `table`.
pub async fn read_all(store: &dyn RecordStore, table: &str) -> Result<ApiGatewayResponse> {
    match store.scan(table).await {
        Ok(records) => ApiGatewayResponse::json(200, &records),
        Err(e) => Ok(store_failure("scan", table, e)),
    }
}

/// Look up one record. A missing id yields 200 with a `null` body.
pub async fn read_one(
    store: &dyn RecordStore,
    table: &str,
    id: &str,
) -> Result<ApiGatewayResponse> {
    match store.get(table, id).await {
        Ok(record) => ApiGatewayResponse::json(200, &record),
        Err(e) => Ok(store_failure("get", table, e)),
    }
}

/// Store a new record under a generated id.
pub async fn create(
    store: &dyn RecordStore,
    table: &str,
    name: &str,
) -> Result<ApiGatewayResponse> {
    let record = Record::new(name);
    match store.put(table, &record).await {
        Ok(()) => {
            info!("Created record {} in {}", record.id, table);
            ApiGatewayResponse::json(201, &record)
        }
        Err(e) => Ok(store_failure("put", table, e)),
    }
}

/// Remove a record by id without checking that it exists.
pub async fn delete(store: &dyn RecordStore, table: &str, id: &str) -> Result<ApiGatewayResponse> {
    match store.delete(table, id).await {
        Ok(()) => {
            info!("Deleted record {} from {}", id, table);
            Ok(ApiGatewayResponse::message(200, "Item deleted successfully"))
        }
        Err(e) => Ok(store_failure("delete", table, e)),
    }
}

fn store_failure(operation: &str, table: &str, err: Error) -> ApiGatewayResponse {
    error!("Store {} on {} failed: {}", operation, table, err);
    ApiGatewayResponse::from_error(&err)
}
