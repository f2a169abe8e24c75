//! Pet adoption portal library.
//!
//! The persistent domain model and workflow engine behind the portal:
//! adopters, shelters and the administrator, the pets shelters list and the
//! applications adopters submit, all stored as JSON collections in a local
//! key-value medium.
//!
//! Start from [`Portal`], which owns the [`store::Store`] and exposes every
//! operation a front end needs.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
mod portal;
pub mod seed;
pub mod services;
pub mod store;

pub use config::PortalConfig;
pub use error::{ErrorKind, PortalError, Result};
pub use portal::Portal;
