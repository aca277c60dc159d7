use crate::dtos::Envelope;

/// `GET /`: answers without touching the store.
pub async fn status() -> Envelope {
    Envelope::message("All good!")
}
