use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// One immutable snapshot of a compose session.
///
/// Snapshots are replaced wholesale, never mutated in place; the owning
/// [`ComposeSession`](crate::session::ComposeSession) derives each successor
/// from the previous one. `Default` is the canonical blank state a session
/// starts from (and returns to on reset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftState {
    /// Identifier of the sending identity, once resolved.
    pub identity_id: Option<String>,
    /// Resolved sender display name. Set together with `email` and
    /// `identity_id`, never independently.
    pub from: String,
    /// Resolved sender address.
    pub email: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Reference to the message being replied to, if any.
    pub in_reply_to: Option<String>,
    /// Layout preference, passed through unmodified.
    pub reply_on_top: Option<bool>,
    /// Whether the subject field is user-visible.
    pub show_subject: bool,
    /// True once user edits diverge from the last non-user baseline.
    pub modified: bool,
    /// True strictly while a send is in flight.
    pub sending: bool,
    /// Status text: empty when idle or sent, otherwise the sending or
    /// failure message for the view layer to display.
    pub sending_msg: String,
}

impl DraftState {
    /// Compare the content fields of two snapshots, ignoring the status
    /// flags (`modified`, `sending`, `sending_msg`).
    pub fn content_eq(&self, other: &DraftState) -> bool {
        self.identity_id == other.identity_id
            && self.from == other.from
            && self.email == other.email
            && self.to == other.to
            && self.subject == other.subject
            && self.body == other.body
            && self.in_reply_to == other.in_reply_to
            && self.reply_on_top == other.reply_on_top
            && self.show_subject == other.show_subject
    }
}

/// The modification-detection rule shared by field edits.
///
/// Once a session is dirty it stays dirty (no comparison needed); a clean
/// session becomes dirty only when the candidate snapshot actually differs
/// from the current one. This keeps a click-in-click-out edit from flipping
/// `modified`.
pub fn detect_modification(
    current: &DraftState,
    candidate: &DraftState,
    already_modified: bool,
) -> bool {
    if already_modified {
        return true;
    }
    !current.content_eq(candidate)
}

/// User-editable draft fields recognized by `set_field`.
///
/// Sender details (`from`/`email`) are deliberately absent: those only
/// change as a group through identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    To,
    Subject,
    Body,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::To => "to",
            DraftField::Subject => "subject",
            DraftField::Body => "body",
        }
    }

    /// Apply this field's new value to a copy of `state`.
    pub fn apply(&self, state: &DraftState, value: &str) -> DraftState {
        let mut next = state.clone();
        match self {
            DraftField::To => next.to = value.to_string(),
            DraftField::Subject => next.subject = value.to_string(),
            DraftField::Body => next.body = value.to_string(),
        }
        next
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = ComposeError;

    /// An unrecognized name is a caller bug, not user input; fail fast.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to" => Ok(DraftField::To),
            "subject" => Ok(DraftField::Subject),
            "body" => Ok(DraftField::Body),
            other => Err(ComposeError::UnknownField(other.to_string())),
        }
    }
}
