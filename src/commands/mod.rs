pub mod mapping;

pub use mapping::{list_mappings, map_types};
