//! Pet Adoption Portal Core - Shared types library.
//!
//! This crate provides common types used across all portal components:
//! - `pet-portal` - Domain model, repositories and workflow engine
//! - `pet-portal-cli` - Command-line front end for the portal
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, passwords, ages and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
