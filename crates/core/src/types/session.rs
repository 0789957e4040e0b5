//! Session state and the exclusive-member allow-list.
//!
//! Session state is derived, never set directly: it is a pure function of
//! "is there an identifier" and "is that identifier on the allow-list".
//! Keeping it derived means the signed-in and exclusive-member facts can
//! never drift apart the way independent boolean flags can.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::UserIdentifier;

/// The authentication/privilege state of the local session.
///
/// Ordered by privilege: `SignedOut < SignedIn < ExclusiveMember`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No identifier exists, or the provider reported revocation.
    SignedOut,
    /// An identifier exists but is not on the allow-list.
    SignedIn,
    /// The identifier is on the allow-list. Unlocks settings and editing.
    ExclusiveMember,
}

impl SessionState {
    /// Derive the session state from the current identifier.
    ///
    /// The allow-list is authoritative: nothing fetched from the remote
    /// store can grant or revoke exclusive membership.
    #[must_use]
    pub fn derive(identifier: Option<&UserIdentifier>, allow_list: &AllowList) -> Self {
        match identifier {
            Some(id) if allow_list.contains(id) => Self::ExclusiveMember,
            Some(_) => Self::SignedIn,
            None => Self::SignedOut,
        }
    }

    /// Whether this state has an active identifier behind it.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn | Self::ExclusiveMember)
    }
}

/// The set of identifiers granted exclusive-member status.
///
/// Injected at construction (typically from configuration) rather than
/// compiled in, so it can be rotated and tested without a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<UserIdentifier>);

impl AllowList {
    /// An empty allow-list; every signed-in user is a regular member.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the identifier is granted exclusive membership.
    #[must_use]
    pub fn contains(&self, identifier: &UserIdentifier) -> bool {
        self.0.contains(identifier)
    }

    /// Number of allow-listed identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the allow-list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<UserIdentifier> for AllowList {
    fn from_iter<I: IntoIterator<Item = UserIdentifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
