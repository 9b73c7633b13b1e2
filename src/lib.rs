//! Filtrate - Data-shaping filters for template engines
//!
//! This crate re-exports all layers of the Filtrate system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: filtrate_filters    - Filters, operators, key paths, registry
//! Layer 0: filtrate_foundation - Core types (Value, LtVec, LtMap, Error)
//! ```

pub use filtrate_filters as filters;
pub use filtrate_foundation as foundation;
