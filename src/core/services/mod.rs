pub mod bill_service;
pub mod payoff_service;
pub mod projection_service;

pub use bill_service::BillService;
pub use payoff_service::PayoffService;
pub use projection_service::ProjectionService;

use crate::errors::EngineError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Invalid(String),
}
