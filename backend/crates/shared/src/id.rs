//! Account identifiers
//!
//! Users and admins live in separate tables and separate sessions, so their
//! ids are distinct types even though both are UUID v4 underneath. A user id
//! can never be looked up in the admin store by accident.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use uuid::Uuid;

/// The kind of account an [`AccountId`] belongs to
pub trait AccountKind {
    /// Short label used in debug output and logs
    const LABEL: &'static str;
}

/// Marker for end-user accounts
pub enum UserAccount {}

/// Marker for administrator accounts
pub enum AdminAccount {}

impl AccountKind for UserAccount {
    const LABEL: &'static str = "user";
}

impl AccountKind for AdminAccount {
    const LABEL: &'static str = "admin";
}

pub struct AccountId<K> {
    uuid: Uuid,
    _kind: PhantomData<fn() -> K>,
}

pub type UserId = AccountId<UserAccount>;
pub type AdminId = AccountId<AdminAccount>;

impl<K> AccountId<K> {
    /// Fresh random id, assigned when the account row is first created
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _kind: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn into_uuid(self) -> Uuid {
        self.uuid
    }
}

impl<K> Default for AccountId<K> {
    fn default() -> Self {
        Self::new()
    }
}

// Written by hand so `K` needs no bounds.
impl<K> Clone for AccountId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for AccountId<K> {}

impl<K> PartialEq for AccountId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K> Eq for AccountId<K> {}

impl<K> Hash for AccountId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K: AccountKind> fmt::Debug for AccountId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", K::LABEL, self.uuid)
    }
}

/// Hyphenated UUID, the form that goes out in JSON and comes back in paths
impl<K> fmt::Display for AccountId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

impl<K> FromStr for AccountId<K> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self::from_uuid)
    }
}
