//! Divano Core - Shared types library.
//!
//! This crate provides common types used across all Divano components:
//! - `bot` - The conversational storefront service
//! - `integration-tests` - End-to-end session-flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no chat
//! transport. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user ids, product codes, categories,
//!   and integer price arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
