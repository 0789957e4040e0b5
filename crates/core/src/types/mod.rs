//! Core domain types.

mod id;
mod profile;
mod session;

pub use id::{AssetRef, UserIdentifier, UserIdentifierError};
pub use profile::{ProfileRecord, RemoteRecord, default_birthday};
pub use session::{AllowList, SessionState};
