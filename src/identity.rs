use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// Display data for a configured sending persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Backend lookups for sender identities.
///
/// Each lookup returns `Ok(None)` when it simply has nothing to offer, so
/// the resolution chain can move on to the next strategy; `Err` means the
/// backend itself broke and the whole resolution is abandoned.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Look up an identity by its identifier.
    async fn identity(&self, id: &str) -> Result<Option<Identity>, ComposeError>;

    /// The platform's default account, if one is configured.
    async fn default_account(&self) -> Result<Option<String>, ComposeError>;

    /// The default identity for an account.
    async fn default_identity(&self, account_id: &str) -> Result<Option<Identity>, ComposeError>;
}

/// One step of the resolution chain.
enum Strategy<'a> {
    /// The identity the caller asked for.
    Requested(&'a str),
    /// Default account, then that account's default identity.
    DefaultChain,
}

impl Strategy<'_> {
    async fn try_resolve(
        &self,
        resolver: &dyn IdentityResolver,
    ) -> Result<Option<Identity>, ComposeError> {
        match self {
            Strategy::Requested(id) => resolver.identity(id).await,
            Strategy::DefaultChain => match resolver.default_account().await? {
                Some(account_id) => resolver.default_identity(&account_id).await,
                None => Ok(None),
            },
        }
    }
}

/// Resolve the sending identity: the requested id first (when given), then
/// the default-account / default-identity chain. The strategies are tried
/// in order; the first hit wins.
pub async fn resolve(
    resolver: &dyn IdentityResolver,
    requested: Option<&str>,
) -> Result<Identity, ComposeError> {
    let strategies = [
        requested.map(Strategy::Requested),
        Some(Strategy::DefaultChain),
    ];

    for strategy in strategies.into_iter().flatten() {
        if let Some(identity) = strategy.try_resolve(resolver).await? {
            log::debug!("resolved identity {} <{}>", identity.id, identity.email);
            return Ok(identity);
        }
    }

    log::warn!("identity resolution exhausted (requested: {requested:?})");
    Err(ComposeError::IdentityNotFound {
        requested: requested.map(str::to_string),
    })
}
