//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod entity_id;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use entity_id::{record_id, EntityId, EntityRef, IdResponse};
