pub mod actor;
pub mod error;
pub mod metrics;

// Re-export the core types to provide a clean public API.
pub use actor::{Actor, MAX_AMOUNT, MAX_AMOUNT_SCALE, ValueChain, check_amount};
pub use error::CoreError;
pub use metrics::ActorMetrics;
