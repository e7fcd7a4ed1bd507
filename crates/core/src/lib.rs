//! Shared types for the Steeple backend.
//!
//! This crate holds the pieces every other crate depends on: opaque id
//! aliases, the caller-facing error taxonomy, and the closed set of
//! notification categories.

pub mod categories;
pub mod error;
pub mod types;
