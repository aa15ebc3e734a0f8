//! Data Transfer Objects - For the oracle boundary
//!
//! DTOs live in the application layer so the HTTP adapter can
//! serialize/deserialize them without the services caring about transport.

pub mod oracle;

pub use oracle::*;
