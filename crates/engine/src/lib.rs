//! Sheetkeep Engine - category resolution and attribute grouping
//!
//! Pure, synchronous transforms over domain values:
//!
//! - [`categorize`] resolves a record's field map against a template's
//!   category schema, with a computed "other" bucket for unclaimed fields.
//! - [`grouping`] partitions attributed records into a multi-level tree.
//! - [`cache`] memoizes either on input identity.

pub mod cache;
pub mod categorize;
pub mod config;
pub mod grouping;
pub mod telemetry;

pub use cache::{CacheStats, GroupingCache, ResolverCache};
pub use categorize::{
    placed_field_keys, resolve, CategoryData, CategoryMap, CategoryResolver, PlacedField,
};
pub use config::EngineConfig;
pub use grouping::{group_by, group_by_filtered_attributes, AttributeGrouper, GroupNode};
pub use telemetry::init_tracing;
