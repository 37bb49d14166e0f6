//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, display-ready)
//! - `wire.rs`: Raw serde structs matching API responses
//! - `convert.rs`: Validation and normalization from wire to domain
//! - `state.rs`: App-owned state containers (market list only)
//! - `client.rs`: Sub-client with HTTP methods

pub mod asset;
pub mod market;
pub mod price_history;
