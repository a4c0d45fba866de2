//! Infrastructure adapters

pub mod cache;
pub mod http_client;
pub mod stdin_prompt;

pub use cache::QueryCache;
pub use http_client::ApiAdapter;
pub use stdin_prompt::StdinConfirm;
