//! Divano Bot library.
//!
//! This crate provides the conversational storefront as a library, allowing
//! the session state machine to be driven and tested without a live chat
//! transport.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod session;
pub mod transport;
