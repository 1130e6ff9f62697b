//! Configuration management for the records Lambda.

use std::env;

use crate::models::Collection;
use crate::{Error, Result};

/// Default table backing the shopping list collection.
pub const DEFAULT_LIST_TABLE: &str = "todo_list_db";
/// Default table backing the notes collection.
pub const DEFAULT_NOTES_TABLE: &str = "notes_db";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Table holding "list" records
    pub list_table: String,
    /// Table holding "notes" records
    pub notes_table: String,
    /// AWS region
    pub aws_region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_table: DEFAULT_LIST_TABLE.to_string(),
            notes_table: DEFAULT_NOTES_TABLE.to_string(),
            aws_region: "us-east-1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            list_table: env::var("LIST_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_LIST_TABLE.to_string()),
            notes_table: env::var("NOTES_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_NOTES_TABLE.to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve the table name for a collection.
    pub fn table_for(&self, collection: Collection) -> &str {
        match collection {
            Collection::List => &self.list_table,
            Collection::Notes => &self.notes_table,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.list_table.trim().is_empty() {
            return Err(Error::Config("LIST_TABLE_NAME must not be empty".to_string()));
        }
        if self.notes_table.trim().is_empty() {
            return Err(Error::Config("NOTES_TABLE_NAME must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let config = Config::default();
        assert_eq!(config.table_for(Collection::List), "todo_list_db");
        assert_eq!(config.table_for(Collection::Notes), "notes_db");
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let config = Config {
            list_table: " ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
