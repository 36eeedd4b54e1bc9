// Model representation and feature layout
pub mod ml;

// Observations, datasets and pricing guardrails
pub mod pricing;

// Domain-specific error types
pub mod errors;
