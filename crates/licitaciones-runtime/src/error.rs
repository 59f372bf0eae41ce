use licitaciones_core::{RegistryError, TransportError};
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Startup failures while wiring the dispatcher
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("backend client error: {0}")]
    Client(#[from] TransportError),
}
