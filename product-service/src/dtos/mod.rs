pub mod envelope;
pub mod products;

pub use envelope::{Envelope, EnvelopeStatus, FAILURE_MESSAGE};
pub use products::{ListProductsParams, ProductResponse};
