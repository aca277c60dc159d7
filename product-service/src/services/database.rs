use super::store::{parse_product_id, ProductStore, StoreError};
use crate::models::{Product, ProductFields};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    Client as MongoClient, Collection, Database,
};
use secrecy::{ExposeSecret, Secret};

const PRODUCTS_COLLECTION: &str = "products";
const DEFAULT_DATABASE: &str = "test";

#[derive(Clone)]
pub struct MongoProductStore {
    client: MongoClient,
    db: Database,
}

impl MongoProductStore {
    /// Parses the connection string and pings the deployment.
    ///
    /// `database` overrides the database named in the connection string; if
    /// neither is given the driver's conventional `test` database is used.
    pub async fn connect(url: &Secret<String>, database: Option<&str>) -> Result<Self, StoreError> {
        tracing::info!("Connecting to MongoDB");
        let mut options = ClientOptions::parse(url.expose_secret()).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            StoreError::from(e)
        })?;
        options.app_name = Some("product-service".to_string());

        let database = database
            .map(str::to_string)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = MongoClient::with_options(options)?;
        let db = client.database(&database);

        let store = Self { client, db };
        store.ping().await?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(store)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS_COLLECTION)
    }
}

fn seller_filter(seller: Option<&str>) -> Document {
    match seller {
        Some(seller) => doc! { "seller": seller },
        None => doc! {},
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }

    async fn list_all(&self, seller: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let cursor = self.products().find(seller_filter(seller), None).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        tracing::debug!(count = products.len(), seller = ?seller, "Listed products");
        Ok(products)
    }

    async fn create_one(&self, fields: ProductFields) -> Result<ObjectId, StoreError> {
        let product = Product::new(fields);
        self.products().insert_one(&product, None).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product.id)
    }

    async fn update_by_id(&self, id: &str, fields: ProductFields) -> Result<(), StoreError> {
        let id = parse_product_id(id)?;
        if fields.is_empty() {
            return Ok(());
        }

        let result = self
            .products()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": fields.to_set_document()? },
                None,
            )
            .await?;

        tracing::info!(
            product_id = %id,
            matched = result.matched_count,
            "Product update applied"
        );
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_product_id(id)?;
        let result = self.products().delete_one(doc! { "_id": id }, None).await?;
        tracing::info!(
            product_id = %id,
            deleted = result.deleted_count,
            "Product delete applied"
        );
        Ok(())
    }

    async fn shutdown(&self) {
        tracing::info!("Closing MongoDB connection");
        self.client.clone().shutdown().await;
    }
}
