//! In-memory record store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::models::Record;
use crate::Result;

/// In-memory storage backend for tests and local runs.
///
/// Each table keeps insertion order so scans are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Record>>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, table: &str, id: &str) -> Result<Option<Record>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    async fn put(&self, table: &str, record: &Record) -> Result<()> {
        let mut tables = self.tables.write().await;
        let records = tables.entry(table.to_string()).or_default();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(records) = tables.get_mut(table) {
            records.retain(|r| r.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = InMemoryStore::new();
        let record = Record::new("milk");

        store.put("todo_list_db", &record).await.unwrap();
        assert_eq!(
            store.get("todo_list_db", &record.id).await.unwrap(),
            Some(record.clone())
        );
        assert_eq!(store.get("notes_db", &record.id).await.unwrap(), None);

        store.delete("todo_list_db", &record.id).await.unwrap();
        assert_eq!(store.get("todo_list_db", &record.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_id_succeeds() {
        let store = InMemoryStore::new();
        assert!(store.delete("todo_list_db", "missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_find_returns_first_match() {
        let store = InMemoryStore::new();
        let first = Record::new("grocery list");
        let second = Record::new("grocery budget");
        store.put("notes_db", &first).await.unwrap();
        store.put("notes_db", &second).await.unwrap();

        let found = store
            .find("notes_db", &|r: &Record| r.name.contains("groc"))
            .await
            .unwrap();
        assert_eq!(found, Some(first));

        let missing = store
            .find("notes_db", &|r: &Record| r.name == "bread")
            .await
            .unwrap();
        assert_eq!(missing, None);
    }
}
