use crate::room::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallError {
    /// An access check rejected the operation. Carries the check's own error.
    #[error(transparent)]
    AccessDenied(anyhow::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
