pub mod commands;
pub mod config;
pub mod db;

pub use db::type_mapper::{map_type, BigQueryType};
