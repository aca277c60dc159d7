#![allow(dead_code)]

use product_service::config::{MongoConfig, ProductConfig};
use product_service::services::{init_metrics, InMemoryProductStore, ProductStore};
use product_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tokio::sync::oneshot;

pub fn test_config(static_dir: &str) -> ProductConfig {
    ProductConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        mongodb: MongoConfig {
            url: Secret::new(
                std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            database: Some(format!("product_test_{}", uuid::Uuid::new_v4().simple())),
        },
        static_dir: static_dir.to_string(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn ProductStore>,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the service on a random port backed by an in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryProductStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn ProductStore>) -> Self {
        // Idempotent; every test binary shares one recorder
        init_metrics();

        let static_dir = format!("target/test-static-{}", uuid::Uuid::new_v4());
        let app = Application::build_with_store(test_config(&static_dir), store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            app.run_with_shutdown(async move {
                rx.await.ok();
            })
            .await
            .ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            client,
            shutdown: Some(tx),
        }
    }

    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    pub async fn create_product(&self, form: &[(&str, &str)]) -> serde_json::Value {
        self.client
            .post(format!("{}/products", self.address))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    pub async fn list_products(&self) -> Vec<serde_json::Value> {
        let body = self.get_json("/products").await;
        assert_eq!(body["status"], "SUCCESS");
        body["data"].as_array().cloned().expect("data is an array")
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn assert_fail(body: &serde_json::Value) {
    assert_eq!(
        body,
        &serde_json::json!({ "status": "FAIL", "message": "Something went wrong!" })
    );
}
