use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SendFailed;

/// The payload handed to the transport gateway on send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// The resolved sending identity, when one was established.
    pub identity_id: Option<String>,
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Originating-message reference for replies.
    pub in_reply_to: Option<String>,
}

/// Delivery backend. Stateless from the session's point of view; every
/// failure (network, validation, backend rejection) is one [`SendFailed`]
/// kind.
#[async_trait]
pub trait TransportGateway: Send + Sync {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), SendFailed>;
}
