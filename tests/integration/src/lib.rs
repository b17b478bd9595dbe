//! Integration test utilities for the social graph
//!
//! This crate provides helpers for running end-to-end scenarios against the
//! in-memory store and, when `DATABASE_URL` is set, PostgreSQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
