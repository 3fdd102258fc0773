use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CrmError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
