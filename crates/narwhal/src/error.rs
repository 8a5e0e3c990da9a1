pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Entity(#[from] narwhal_core::Error),

    #[error("feature vector {index} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate entity id: {entity_id}")]
    DuplicateEntity { entity_id: String },

    #[error("invalid layout config: {message}")]
    InvalidConfig { message: String },
}
