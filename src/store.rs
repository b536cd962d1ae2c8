use std::sync::Mutex;

use tokio::sync::watch;

use crate::draft::DraftState;

/// Synchronous observer callback, invoked with every published snapshot.
pub type Observer = Box<dyn Fn(&DraftState) + Send + Sync>;

/// Holds exactly one [`DraftState`] snapshot and accepts whole-snapshot
/// replacement. No partial mutation is exposed; all derivation happens in
/// the owning session.
///
/// Observation comes in two flavors: synchronous callbacks registered with
/// [`on_change`](DraftStore::on_change) see every snapshot in order
/// (including the transient blank state `initialize` publishes before
/// identity resolution completes), while [`subscribe`](DraftStore::subscribe)
/// hands out a `watch::Receiver` for async view layers that only care about
/// the latest value.
pub struct DraftStore {
    tx: watch::Sender<DraftState>,
    observers: Mutex<Vec<Observer>>,
}

impl DraftStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DraftState::default());
        DraftStore {
            tx,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> DraftState {
        self.tx.borrow().clone()
    }

    /// Replace the snapshot and notify observers synchronously.
    pub fn replace(&self, next: DraftState) {
        self.tx.send_replace(next.clone());
        let observers = self
            .observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for observer in observers.iter() {
            observer(&next);
        }
    }

    /// Register a synchronous observer. Called on the replacing thread for
    /// every snapshot; keep it cheap.
    pub fn on_change(&self, observer: impl Fn(&DraftState) + Send + Sync + 'static) {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        observers.push(Box::new(observer));
    }

    /// Watch-channel subscription for async consumers. Intermediate
    /// snapshots may be coalesced if the receiver lags; use `on_change`
    /// when every snapshot matters.
    pub fn subscribe(&self) -> watch::Receiver<DraftState> {
        self.tx.subscribe()
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
