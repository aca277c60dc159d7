use super::store::{parse_product_id, ProductStore, StoreError};
use crate::models::{Product, ProductFields};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::RwLock;

/// Process-local product store with the same semantics as MongoDB.
///
/// Records keep insertion order, which is what an unindexed `find({})`
/// returns in practice.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    tracing::error!("In-memory product store lock poisoned: {}", e);
    StoreError::Unavailable
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.products.read().map(|_| ()).map_err(poisoned)
    }

    async fn list_all(&self, seller: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products
            .iter()
            .filter(|p| seller.is_none() || p.fields.seller.as_deref() == seller)
            .cloned()
            .collect())
    }

    async fn create_one(&self, fields: ProductFields) -> Result<ObjectId, StoreError> {
        let product = Product::new(fields);
        let id = product.id;
        self.products.write().map_err(poisoned)?.push(product);
        Ok(id)
    }

    async fn update_by_id(&self, id: &str, fields: ProductFields) -> Result<(), StoreError> {
        let id = parse_product_id(id)?;
        let mut products = self.products.write().map_err(poisoned)?;
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            product.fields.apply(&fields);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_product_id(id)?;
        self.products
            .write()
            .map_err(poisoned)?
            .retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, seller: Option<&str>) -> ProductFields {
        ProductFields {
            title: Some(title.to_string()),
            seller: seller.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_product_is_listed_with_new_id() {
        let store = InMemoryProductStore::new();
        let id = store.create_one(fields("Pen", Some("Acme"))).await.unwrap();

        let products = store.list_all(None).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, id);
        assert_eq!(products[0].fields.title.as_deref(), Some("Pen"));
    }

    #[tokio::test]
    async fn seller_filter_is_exact() {
        let store = InMemoryProductStore::new();
        store.create_one(fields("Pen", Some("Acme"))).await.unwrap();
        store.create_one(fields("Ink", Some("acme"))).await.unwrap();
        store.create_one(fields("Pad", None)).await.unwrap();

        let acme = store.list_all(Some("Acme")).await.unwrap();
        assert_eq!(acme.len(), 1);
        assert_eq!(acme[0].fields.title.as_deref(), Some("Pen"));

        assert!(store.list_all(Some("Nobody")).await.unwrap().is_empty());
        assert_eq!(store.list_all(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields() {
        let store = InMemoryProductStore::new();
        let id = store.create_one(fields("Pen", Some("Acme"))).await.unwrap();

        store
            .update_by_id(
                &id.to_hex(),
                ProductFields {
                    price: Some(Some(4.0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let product = &store.list_all(None).await.unwrap()[0];
        assert_eq!(product.fields.title.as_deref(), Some("Pen"));
        assert_eq!(product.fields.seller.as_deref(), Some("Acme"));
        assert_eq!(product.fields.price, Some(Some(4.0)));
    }

    #[tokio::test]
    async fn missing_ids_are_not_errors() {
        let store = InMemoryProductStore::new();
        let ghost = ObjectId::new().to_hex();

        store
            .update_by_id(&ghost, fields("Ghost", None))
            .await
            .unwrap();
        store.delete_by_id(&ghost).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn malformed_ids_are_errors() {
        let store = InMemoryProductStore::new();
        assert!(matches!(
            store.delete_by_id("42").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.update_by_id("42", ProductFields::default()).await,
            Err(StoreError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = InMemoryProductStore::new();
        let keep = store.create_one(fields("Keep", None)).await.unwrap();
        let gone = store.create_one(fields("Gone", None)).await.unwrap();

        store.delete_by_id(&gone.to_hex()).await.unwrap();

        let products = store.list_all(None).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, keep);
    }
}
