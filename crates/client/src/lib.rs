//! Ridgelea client library.
//!
//! The membership-application core: a session controller wired between an
//! identity provider and a single-record cloud store. The UI layer above
//! this crate owns presentation only; every state transition and every
//! remote call lives here.
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration, including the injected
//!   exclusive-member allow-list
//! - [`identity`] - The identity provider seam (sign-in, credential state)
//! - [`store`] - The profile store seam, with an HTTP implementation and an
//!   in-memory fixture
//! - [`session`] - The session controller tying it all together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod identity;
pub mod session;
pub mod store;

pub use error::ClientError;
pub use session::Session;
