pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
mod serde_utils;
pub mod services;
pub mod store;
