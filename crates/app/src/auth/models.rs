//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::users::records::UserUuid;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user: UserUuid,
    pub username: String,
    pub is_admin: bool,

    /// Where order confirmations are sent, if anywhere.
    pub email: Option<String>,
}

/// A live token row together with the actor it authenticates.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub token_hash: String,
    pub actor: Actor,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub token_hash: String,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
