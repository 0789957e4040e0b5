//! Ridgelea Core - Shared types library.
//!
//! This crate provides the common types used across all Ridgelea components:
//! - `client` - Session controller and remote record store access
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - The profile record, its remote representation, form
//!   completeness, and session state derivation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
