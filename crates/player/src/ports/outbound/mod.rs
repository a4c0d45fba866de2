//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the backend and the player
//! without depending on concrete implementations.

pub mod api_port;
pub mod prompt_port;
pub mod raw_api_port;

pub use api_port::{ApiError, ApiPort};
pub use prompt_port::ConfirmPort;
pub use raw_api_port::RawApiPort;

#[cfg(test)]
pub use prompt_port::MockConfirmPort;
#[cfg(test)]
pub use raw_api_port::MockRawApiPort;
