//! User confirmation port
//!
//! The wizard asks the player before throwing away edits it failed to save.
//! A UI shell implements this with a dialog; the CLI runner with stdin.

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ConfirmPort: Send + Sync {
    /// Ask a yes/no question; `true` means the player accepted.
    async fn confirm(&self, message: &str) -> bool;
}
