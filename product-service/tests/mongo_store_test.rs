//! Exercises the MongoDB gateway against a live server.
//!
//! Run with `TEST_MONGODB_URI` pointing at a disposable deployment and
//! `cargo test -- --ignored`.

mod common;

use common::test_config;
use product_service::models::ProductFields;
use product_service::services::{MongoProductStore, ProductStore, StoreError};

async fn connect() -> (MongoProductStore, String) {
    let config = test_config("public");
    let db_name = config.mongodb.database.clone().expect("test database name");
    let store = MongoProductStore::connect(&config.mongodb.url, Some(&db_name))
        .await
        .expect("Failed to connect to MongoDB");
    (store, db_name)
}

async fn cleanup(store: &MongoProductStore, db_name: &str) {
    let _ = store.client().database(db_name).drop(None).await;
}

#[tokio::test]
#[ignore = "Requires MongoDB running at TEST_MONGODB_URI (default mongodb://localhost:27017)"]
async fn lifecycle_against_mongodb() {
    let (store, db_name) = connect().await;

    let id = store
        .create_one(ProductFields {
            title: Some("Pen".to_string()),
            seller: Some("Acme".to_string()),
            price: Some(Some(2.0)),
            ..Default::default()
        })
        .await
        .unwrap();

    let acme = store.list_all(Some("Acme")).await.unwrap();
    assert_eq!(acme.len(), 1);
    assert_eq!(acme[0].id, id);

    store
        .update_by_id(
            &id.to_hex(),
            ProductFields {
                price: Some(Some(3.0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let product = &store.list_all(None).await.unwrap()[0];
    assert_eq!(product.fields.title.as_deref(), Some("Pen"));
    assert_eq!(product.fields.price, Some(Some(3.0)));

    store.delete_by_id(&id.to_hex()).await.unwrap();
    assert!(store.list_all(None).await.unwrap().is_empty());

    cleanup(&store, &db_name).await;
}

#[tokio::test]
#[ignore = "Requires MongoDB running at TEST_MONGODB_URI (default mongodb://localhost:27017)"]
async fn missing_and_malformed_ids_against_mongodb() {
    let (store, db_name) = connect().await;
    let ghost = mongodb::bson::oid::ObjectId::new().to_hex();

    store
        .update_by_id(
            &ghost,
            ProductFields {
                title: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    store.delete_by_id(&ghost).await.unwrap();
    assert!(store.list_all(None).await.unwrap().is_empty());

    assert!(matches!(
        store.delete_by_id("nope").await,
        Err(StoreError::InvalidId(_))
    ));

    cleanup(&store, &db_name).await;
}
