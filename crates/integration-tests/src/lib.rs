//! Divano integration tests.
//!
//! This crate exists for its `tests/` directory: end-to-end session flows
//! driven through the public `divano-bot` API against an in-memory
//! inventory fake and a recording reply sink. See `tests/support/` for
//! the shared harness.

#![cfg_attr(not(test), forbid(unsafe_code))]
