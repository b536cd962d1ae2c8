use serde::{Deserialize, Serialize};

/// Status strings published through `sending_msg`.
///
/// Localization lives in the embedding application; the defaults here are
/// plain English fallbacks for hosts that never customize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessages {
    /// Shown while a send is in flight.
    pub sending: String,
    /// Shown after the transport rejects or throws.
    pub send_failed: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        StatusMessages {
            sending: "Sending message...".into(),
            send_failed: "Couldn't send the message.".into(),
        }
    }
}
