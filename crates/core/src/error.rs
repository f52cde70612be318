#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid schema for field '{field}': {reason}")]
    Schema { field: String, reason: String },

    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' does not accept files")]
    NotAFileField(String),
}

impl CoreError {
    pub(crate) fn schema(field: &str, reason: impl Into<String>) -> Self {
        CoreError::Schema {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
