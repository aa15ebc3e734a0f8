//! Application layer - Use cases and ports
//!
//! This layer contains:
//! - DTOs: Oracle request and response bodies
//! - Ports: Inbound UI commands, outbound oracle interface
//! - Services: Generation, rerolls, template save, rendering

pub mod dto;
pub mod ports;
pub mod services;
