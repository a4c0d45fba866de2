//! Application layer
//!
//! Services for the character creation API, the draft reconciler and the
//! wizard controller built on top of them.

pub mod api;
pub mod boundary;
pub mod draft_store;
pub mod error;
pub mod query;
pub mod services;
pub mod wizard;

pub use api::Api;
pub use boundary::{Recovery, StageBoundary, StageFault};
pub use draft_store::DraftStore;
pub use error::{ServiceError, GENERIC_ERROR_MESSAGE, SAVE_FAILED_PROMPT};
pub use wizard::Wizard;
