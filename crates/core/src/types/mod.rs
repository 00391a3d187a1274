//! Core types for Divano.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{Category, ProductCode, UserId};
pub use price::{MINOR_PER_MAJOR, major_from_minor};
