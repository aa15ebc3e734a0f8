//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - HTTP: Page routes
//! - Oracle client: Generation oracle integration
//! - Config: Application configuration
//! - State: Shared application state
//! - Session: Open page registry

pub mod config;
pub mod http;
pub mod oracle_client;
pub mod session;
pub mod state;
