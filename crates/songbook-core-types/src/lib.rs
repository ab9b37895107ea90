//! Core types shared across Songbook facilities
//!
//! This crate holds the canonical schema constants used by both the error
//! and logging facilities, so that log fields stay stable across crates.

pub mod schema;
