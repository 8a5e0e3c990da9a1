pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid entity JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entity `{entity_id}` has an empty id or name")]
    MissingIdentity { entity_id: String },
}
