//! Confirmer Gateway
//!
//! Asks the operator before destructive regeneration or data deletion.

use async_trait::async_trait;

use crate::shared::errors::GatewayError;

/// Interactive yes/no confirmation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask `question`; `Ok(false)` is a decline, never an error
    async fn confirm(&self, question: &str) -> Result<bool, GatewayError>;
}
