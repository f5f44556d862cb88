pub mod configuration;
pub mod ids;
pub mod tracing;
