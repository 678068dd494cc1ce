pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "property")]
pub mod property;

pub use error::RealtyError;
pub use types::*;

/// Standard result type for all realty operations
pub type RealtyResult<T> = Result<T, RealtyError>;
