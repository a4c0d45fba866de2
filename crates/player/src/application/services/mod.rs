//! Application services
//!
//! Use cases of the character creation client. Services depend on the
//! [`Api`](crate::application::api::Api) wrapper and the shared
//! [`QueryCache`](crate::infrastructure::QueryCache), never on adapters.

pub mod application_service;
pub mod catalog_service;
pub mod draft_service;
pub mod magic_service;

pub use application_service::ApplicationService;
pub use catalog_service::{CatalogService, MagicCatalog};
pub use draft_service::DraftService;
pub use magic_service::MagicService;
