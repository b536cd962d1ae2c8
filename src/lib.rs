//! Compose-session state controller for mail client reply/compose UIs.
//!
//! A [`ComposeSession`] owns one [`DraftStore`] and exposes the intents a
//! view layer issues: `initialize`, `set_field`, `send`, `reset`, `close`.
//! Each intent derives the next immutable [`DraftState`] snapshot, awaiting
//! the pluggable collaborators ([`IdentityResolver`], [`TransportGateway`],
//! [`CloseStrategy`]) where asynchronous work is needed, and publishes it
//! for the view to render.
//!
//! Rendering, localization, draft persistence, and the actual transport
//! protocol all live in the embedding application.

pub mod draft;
pub mod error;
pub mod identity;
pub mod session;
pub mod status;
pub mod store;
pub mod transport;

pub use draft::{detect_modification, DraftField, DraftState};
pub use error::{ComposeError, SendFailed};
pub use identity::{Identity, IdentityResolver};
pub use session::{CloseStrategy, ComposeRequest, ComposeSession, NoopClose, SendOutcome};
pub use status::StatusMessages;
pub use store::DraftStore;
pub use transport::{OutgoingMessage, TransportGateway};
