pub mod health;
pub mod products;
pub mod status;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use products::{create_product, delete_product, list_products, update_product};
pub use status::status;
