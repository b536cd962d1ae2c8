use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::draft::{detect_modification, DraftField, DraftState};
use crate::error::ComposeError;
use crate::identity::{self, IdentityResolver};
use crate::status::StatusMessages;
use crate::store::DraftStore;
use crate::transport::{OutgoingMessage, TransportGateway};

/// What "finishing composing" means in the hosting context: close a window,
/// collapse an inline reply panel, navigate away. Runs only after a
/// successful send. The default does nothing.
#[async_trait]
pub trait CloseStrategy: Send + Sync {
    async fn close_session(&self);
}

/// Default close behavior: resolve immediately, leave the surface alone.
pub struct NoopClose;

#[async_trait]
impl CloseStrategy for NoopClose {
    async fn close_session(&self) {}
}

/// Inputs for starting (or restarting) a compose session.
#[derive(Debug, Clone, Default)]
pub struct ComposeRequest {
    /// Identity to compose as; `None` resolves the platform default.
    pub identity_id: Option<String>,
    /// Originating message, for replies.
    pub in_reply_to: Option<String>,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub show_subject: bool,
    pub reply_on_top: Option<bool>,
}

/// How a `send` intent ended. Send failures never surface as errors; they
/// are absorbed into the draft's `sending_msg` so content survives for a
/// retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Delivered; flags cleared and the close strategy ran.
    Sent,
    /// Transport rejected or threw; content and `modified` preserved.
    Failed,
    /// Ignored: another send was already in flight.
    InFlight,
    /// The session was reset or reinitialized while the transport call was
    /// in flight; the late result was discarded without touching the store.
    Superseded,
}

/// Orchestrates one compose session: owns the [`DraftStore`], derives every
/// successor snapshot, and coordinates the identity resolver, the transport
/// gateway, and the close strategy.
///
/// Intents take `&self`; a UI can hold the session in an `Arc` and issue
/// them from async tasks. The session assumes one logical actor issues
/// intents (the concurrency hazards it does guard against are a second
/// `send` while one is in flight, and a transport result arriving after the
/// session was reset).
pub struct ComposeSession {
    store: DraftStore,
    resolver: Arc<dyn IdentityResolver>,
    transport: Arc<dyn TransportGateway>,
    close: Arc<dyn CloseStrategy>,
    status: StatusMessages,
    /// Bumped by `reset`/`initialize`; lets `send` detect that its result
    /// belongs to a discarded session.
    epoch: AtomicU64,
}

impl ComposeSession {
    pub fn new(resolver: Arc<dyn IdentityResolver>, transport: Arc<dyn TransportGateway>) -> Self {
        ComposeSession {
            store: DraftStore::new(),
            resolver,
            transport,
            close: Arc::new(NoopClose),
            status: StatusMessages::default(),
            epoch: AtomicU64::new(0),
        }
    }

    /// Replace the close strategy for this hosting context.
    pub fn with_close_strategy(mut self, close: Arc<dyn CloseStrategy>) -> Self {
        self.close = close;
        self
    }

    /// Replace the (caller-localized) status strings.
    pub fn with_status_messages(mut self, status: StatusMessages) -> Self {
        self.status = status;
        self
    }

    /// The session's store, for observer registration and subscriptions.
    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    /// Convenience for `store().current()`.
    pub fn state(&self) -> DraftState {
        self.store.current()
    }

    /// Start (or restart) the session.
    ///
    /// Publishes the blank state first (the transient blank snapshot is
    /// deliberately observable), then resolves the sending identity and
    /// publishes the populated snapshot with `modified` still false.
    ///
    /// Resolution failure is fatal to the session and returned to the
    /// caller; the store stays at the blank snapshot.
    pub async fn initialize(&self, request: ComposeRequest) -> Result<(), ComposeError> {
        self.reset();

        let identity =
            identity::resolve(self.resolver.as_ref(), request.identity_id.as_deref()).await?;

        // Non-user update: sender details land as a group, `modified` is
        // left untouched (false, after the reset above).
        let current = self.store.current();
        self.store.replace(DraftState {
            identity_id: Some(identity.id),
            from: identity.display_name,
            email: identity.email,
            to: request.to,
            subject: request.subject,
            body: request.body,
            in_reply_to: request.in_reply_to,
            reply_on_top: request.reply_on_top,
            show_subject: request.show_subject,
            ..current
        });
        Ok(())
    }

    /// Apply one user edit.
    ///
    /// Unrecognized field names indicate a view-layer bug and fail fast.
    /// A clean session compares the candidate snapshot against the current
    /// one and only becomes `modified` when something actually differs; a
    /// no-op edit leaves the snapshot untouched. An already-dirty session
    /// skips the comparison entirely.
    pub fn set_field(&self, name: &str, value: &str) -> Result<(), ComposeError> {
        let field: DraftField = name.parse()?;
        let current = self.store.current();
        let candidate = field.apply(&current, value);

        if detect_modification(&current, &candidate, current.modified) {
            self.store.replace(DraftState {
                modified: true,
                ..candidate
            });
        }
        Ok(())
    }

    /// Hand the draft to the transport gateway.
    ///
    /// At most one transport call is in flight per session: a `send` issued
    /// while `sending` is already true is ignored. Transport failures never
    /// escape; they land in `sending_msg` with the draft content and its
    /// dirty flag intact.
    pub async fn send(&self) -> SendOutcome {
        let state = self.store.current();
        if state.sending {
            log::warn!("send ignored: a send is already in flight");
            return SendOutcome::InFlight;
        }

        // No await between the check above and this transition; intents run
        // on one logical actor, so the in-flight guard holds.
        self.store.replace(DraftState {
            sending: true,
            sending_msg: self.status.sending.clone(),
            ..state.clone()
        });

        let epoch = self.epoch.load(Ordering::SeqCst);
        let message = OutgoingMessage {
            identity_id: state.identity_id.clone(),
            to: state.to.clone(),
            subject: state.subject.clone(),
            body: state.body.clone(),
            in_reply_to: state.in_reply_to.clone(),
        };

        let result = self.transport.deliver(&message).await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            log::debug!("send result discarded: session was reset mid-flight");
            return SendOutcome::Superseded;
        }

        match result {
            Ok(()) => {
                let current = self.store.current();
                self.store.replace(DraftState {
                    sending: false,
                    modified: false,
                    sending_msg: String::new(),
                    ..current
                });
                self.close.close_session().await;
                SendOutcome::Sent
            }
            Err(err) => {
                log::error!("{err}");
                // Content and `modified` survive a failed send.
                let current = self.store.current();
                self.store.replace(DraftState {
                    sending: false,
                    sending_msg: self.status.send_failed.clone(),
                    ..current
                });
                SendOutcome::Failed
            }
        }
    }

    /// Discard the draft: publish the canonical blank state.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.store.replace(DraftState::default());
    }

    /// Run the close strategy directly (e.g. a Cancel button).
    pub async fn close(&self) {
        self.close.close_session().await;
    }
}
