//! Ports - the application's boundaries

pub mod inbound;
pub mod outbound;
