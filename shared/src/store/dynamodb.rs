//! DynamoDB record store.
//!
//! Items are stored as `{ "id": S, "name": S }` with `id` as the partition key.

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::RecordStore;
use crate::models::Record;
use crate::{Error, Result};

/// DynamoDB-backed store. The client is cheap to clone and safe to share
/// across invocations.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn get(&self, table: &str, id: &str) -> Result<Option<Record>> {
        debug!("GetItem table={} id={}", table, id);
        let result = self
            .client
            .get_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        result.item.as_ref().map(item_to_record).transpose()
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>> {
        debug!("Scan table={}", table);
        let result = self
            .client
            .scan()
            .table_name(table)
            .send()
            .await
            .map_err(map_scan_error)?;

        result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect()
    }

    async fn put(&self, table: &str, record: &Record) -> Result<()> {
        debug!("PutItem table={} id={}", table, record.id);
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(map_put_item_error)?;
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<()> {
        debug!("DeleteItem table={} id={}", table, id);
        self.client
            .delete_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;
        Ok(())
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Convert a Record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::S(record.id.clone()));
    item.insert("name".to_string(), AttributeValue::S(record.name.clone()));
    item
}

/// Convert a DynamoDB item to a Record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record> {
    Ok(Record {
        id: get_string(item, "id")?,
        name: get_string(item, "name")?,
    })
}

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::Store(format!("Missing or invalid field: {}", key)))
}

// ============================================================================
// Error mapping
// ============================================================================

fn map_get_item_error<R: Debug + Send + Sync + 'static>(err: SdkError<GetItemError, R>) -> Error {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(),
        GetItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        GetItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        GetItemError::InternalServerError(_) => internal_server_error(),
        err => Error::Store(format!("GetItem failed: {:?}", err)),
    }
}

fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> Error {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_not_found(),
        ScanError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        ScanError::RequestLimitExceeded(_) => request_limit_exceeded(),
        ScanError::InternalServerError(_) => internal_server_error(),
        err => Error::Store(format!("Scan failed: {:?}", err)),
    }
}

fn map_put_item_error<R: Debug + Send + Sync + 'static>(err: SdkError<PutItemError, R>) -> Error {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => table_not_found(),
        PutItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        PutItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            Error::Store("Item collection size limit exceeded".to_string())
        }
        PutItemError::InternalServerError(_) => internal_server_error(),
        err => Error::Store(format!("PutItem failed: {:?}", err)),
    }
}

fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> Error {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(),
        DeleteItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        DeleteItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        DeleteItemError::InternalServerError(_) => internal_server_error(),
        err => Error::Store(format!("DeleteItem failed: {:?}", err)),
    }
}

fn table_not_found() -> Error {
    Error::Store("Table not found".to_string())
}

fn throughput_exceeded() -> Error {
    Error::Store("Throughput exceeded".to_string())
}

fn request_limit_exceeded() -> Error {
    Error::Store("Request limit exceeded".to_string())
}

fn internal_server_error() -> Error {
    Error::Store("DynamoDB internal server error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_item_conversion() {
        let record = Record {
            id: "3f1c".to_string(),
            name: "bread".to_string(),
        };
        let item = record_to_item(&record);
        assert_eq!(item.get("id"), Some(&AttributeValue::S("3f1c".to_string())));
        assert_eq!(item_to_record(&item).unwrap(), record);
    }

    #[test]
    fn test_item_missing_name_is_rejected() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("3f1c".to_string()));
        let err = item_to_record(&item).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_item_with_non_string_name_is_rejected() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("3f1c".to_string()));
        item.insert("name".to_string(), AttributeValue::N("7".to_string()));
        assert!(matches!(item_to_record(&item), Err(Error::Store(_))));
    }
}
