//! JSON-LD (schema.org) graph access: property lookup and flattening.

mod cache;
mod flatten;
mod lookup;

pub use cache::structural_hash;
pub use flatten::flatten_schema;
pub use lookup::{clear_schema_cache, get_schema_property};
