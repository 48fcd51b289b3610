//! Data-access layer for the portal.
//!
//! The services never talk to a concrete backend. They are written against the
//! traits in `repository`, which lets the hosted REST store, the in-memory
//! fixture store and the fallback decorator be swapped by configuration.
//!
//! # Architecture
//!
//! - `error`: Backend-agnostic error types
//! - `models`: Domain records (Job, SeniorLiving, MatchProfile, Donation, SuccessStory)
//! - `repository`: Trait definitions for data access
//! - `rest`: HTTPS client for the hosted relational store
//! - `memory`: In-memory tables seeded with fixture datasets
//! - `fallback`: Decorator substituting fixtures when the primary store fails

mod error;
mod fallback;
pub mod memory;
mod models;
mod repository;
pub mod rest;
pub(crate) mod utils;

#[cfg(test)]
mod fallback_test;

pub use error::{StoreError, StoreResult};
pub use fallback::FallbackStore;
pub use memory::MemoryStore;
pub use models::*;
pub use repository::*;
pub use rest::RestStore;
