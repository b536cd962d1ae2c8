use thiserror::Error;

/// Failures that cross the session boundary.
///
/// Send failures never appear here: they are absorbed into the draft's
/// `sending_msg` so the user can retry without losing content.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// No usable sender identity. Fatal to `initialize`: composing
    /// without a valid sender is meaningless.
    #[error("no usable sender identity (requested: {requested:?})")]
    IdentityNotFound { requested: Option<String> },

    /// The identity backend itself failed (as opposed to finding nothing).
    #[error("identity lookup failed: {0}")]
    Resolver(String),

    /// A caller passed a field name `set_field` does not recognize.
    #[error("unknown compose field: {0}")]
    UnknownField(String),
}

/// The one failure kind the transport gateway reports. Network errors,
/// validation errors, and backend rejections all collapse into this.
#[derive(Debug, Error)]
#[error("send failed: {0}")]
pub struct SendFailed(pub String);
