//! Outbound ports - Interfaces that the application requires from external systems

mod generation_oracle_port;

pub use generation_oracle_port::{GenerationOraclePort, OracleError};

#[cfg(test)]
pub use generation_oracle_port::MockGenerationOraclePort;
