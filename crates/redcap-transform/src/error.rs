use redcap_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("failed to assemble output dataset: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
