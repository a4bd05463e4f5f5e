//! # Value Chain Analytics Engine
//!
//! This crate computes the per-actor economic metrics of a linear value chain:
//! gross income, gross margin, added value and value share.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   charts or reports. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `compute_metrics` is a single forward pass over the
//!   ordered actors with one carried value (the previous actor's selling price).
//!   The `ValueChainEngine` wraps it and adds a chain-level summary.
//!
//! ## Public API
//!
//! - `compute_metrics`: The metric calculator itself.
//! - `ValueChainEngine`: The stateless engine producing a `ValueChainReport`.
//! - `ValueChainReport` / `ChainSummary`: The standardized output structs.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{ValueChainEngine, compute_metrics};
pub use report::{ChainSummary, ValueChainReport};
