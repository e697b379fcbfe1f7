// Domain-driven module structure for scour.

// Core infrastructure
pub mod conf;
pub mod error;
pub mod source;

// Pipeline stages
pub mod filter;
pub mod extract;
pub mod sanitize;
pub mod record;
pub mod writer;

// Governance and orchestration
pub mod govern;
pub mod pipeline;
