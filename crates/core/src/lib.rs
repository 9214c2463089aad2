//! Larder Core - Shared types library.
//!
//! This crate provides common types used across all Larder components:
//! - `server` - The grocery/recipe REST API
//! - `cli` - Command-line tools for migrations, seeding, and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus
//!   quantity and unit helpers shared by the grocery aggregator and the
//!   suggestion engine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
