//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
///
/// Never carries password material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,

    /// Recipient for order notifications.
    pub email: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
}
