//! Core types for Larder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod quantity;
pub mod unit;

pub use email::{Email, EmailError};
pub use id::*;
pub use quantity::{format_quantity, parse_quantity};
pub use unit::normalize_unit;
