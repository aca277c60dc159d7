use crate::models::{Product, ProductFields};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid product id: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error("product store is unavailable")]
    Unavailable,
}

/// Persistence gateway for the single `products` collection.
///
/// Updates and deletes do not check existence: an id that matches nothing
/// completes successfully. Only a malformed id is an error.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_all(&self, seller: Option<&str>) -> Result<Vec<Product>, StoreError>;

    async fn create_one(&self, fields: ProductFields) -> Result<ObjectId, StoreError>;

    async fn update_by_id(&self, id: &str, fields: ProductFields) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// Releases the underlying connection. Called once, after the server stops.
    async fn shutdown(&self) {}
}

pub fn parse_product_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Stands in for the database when the initial connection failed.
pub struct UnavailableStore;

#[async_trait]
impl ProductStore for UnavailableStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn list_all(&self, _seller: Option<&str>) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn create_one(&self, _fields: ProductFields) -> Result<ObjectId, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn update_by_id(&self, _id: &str, _fields: ProductFields) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
