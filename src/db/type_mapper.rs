use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::overrides::TypeOverride;

/// BigQuery column types a Sybase column can land on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BigQueryType {
    Int64,
    Numeric,
    FixedNumeric { precision: u8, scale: u8 },
    Float64,
    String,
    Timestamp,
    Date,
    Time,
    Bool,
    Bytes,
}

impl fmt::Display for BigQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigQueryType::Int64 => write!(f, "INT64"),
            BigQueryType::Numeric => write!(f, "NUMERIC"),
            BigQueryType::FixedNumeric { precision, scale } => {
                write!(f, "NUMERIC({},{})", precision, scale)
            }
            BigQueryType::Float64 => write!(f, "FLOAT64"),
            BigQueryType::String => write!(f, "STRING"),
            BigQueryType::Timestamp => write!(f, "TIMESTAMP"),
            BigQueryType::Date => write!(f, "DATE"),
            BigQueryType::Time => write!(f, "TIME"),
            BigQueryType::Bool => write!(f, "BOOL"),
            BigQueryType::Bytes => write!(f, "BYTES"),
        }
    }
}

/// Target type for any source type missing from the table
pub const DEFAULT_TYPE: BigQueryType = BigQueryType::String;

/// Built-in Sybase to BigQuery table, keyed by upper-case Sybase type name.
pub const SYBASE_TYPE_MAPPINGS: &[(&str, BigQueryType)] = &[
    ("INT", BigQueryType::Int64),
    ("INTEGER", BigQueryType::Int64),
    ("SMALLINT", BigQueryType::Int64),
    ("TINYINT", BigQueryType::Int64),
    ("BIGINT", BigQueryType::Int64),
    ("DECIMAL", BigQueryType::Numeric),
    ("NUMERIC", BigQueryType::Numeric),
    ("MONEY", BigQueryType::FixedNumeric { precision: 19, scale: 4 }),
    ("SMALLMONEY", BigQueryType::FixedNumeric { precision: 10, scale: 4 }),
    ("FLOAT", BigQueryType::Float64),
    ("REAL", BigQueryType::Float64),
    ("CHAR", BigQueryType::String),
    ("VARCHAR", BigQueryType::String),
    ("TEXT", BigQueryType::String),
    ("NCHAR", BigQueryType::String),
    ("NVARCHAR", BigQueryType::String),
    ("NTEXT", BigQueryType::String),
    ("DATETIME", BigQueryType::Timestamp),
    ("SMALLDATETIME", BigQueryType::Timestamp),
    ("DATE", BigQueryType::Date),
    ("TIME", BigQueryType::Time),
    ("BIT", BigQueryType::Bool),
    ("BINARY", BigQueryType::Bytes),
    ("VARBINARY", BigQueryType::Bytes),
    ("IMAGE", BigQueryType::Bytes),
];

/// Look up a Sybase type name in the built-in table, ignoring case.
pub fn lookup(sybase_type: &str) -> Option<BigQueryType> {
    let upper = sybase_type.to_uppercase();
    SYBASE_TYPE_MAPPINGS
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, bq)| *bq)
}

/// Map a Sybase type name to its BigQuery type name.
///
/// Unknown names map to `STRING`. The input is matched whole, so
/// `VARCHAR(255)` is unknown here; use [`TypeMapper::resolve`] for declared
/// column types.
pub fn map_type(sybase_type: &str) -> String {
    lookup(sybase_type).unwrap_or(DEFAULT_TYPE).to_string()
}

/// Same as [`map_type`], with a missing type treated as unknown.
pub fn map_optional_type(sybase_type: Option<&str>) -> String {
    sybase_type.map(map_type).unwrap_or_else(|| DEFAULT_TYPE.to_string())
}

/// Upper-cased type name with any size or precision suffix cut off.
///
/// Cuts at the first `(` or `[` only, so multi-word names stay whole:
/// `varchar(255)` -> `VARCHAR`, `numeric (10,2)` -> `NUMERIC`,
/// `long varchar(100)` -> `LONG VARCHAR`.
pub fn base_type(declared: &str) -> String {
    let upper = declared.to_uppercase();
    upper
        .split(['(', '['])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Where a resolved target type came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MappingOrigin {
    Builtin,
    Override,
    Default,
}

/// Outcome of resolving one declared source type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeResolution {
    pub source_type: String,
    pub base_type: String,
    pub target_type: String,
    pub origin: MappingOrigin,
}

/// Built-in table plus user overrides.
///
/// Overrides take precedence over the built-in table. Never mutated once
/// built, so a shared reference can be used from any thread.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    overrides: HashMap<String, String>,
}

impl TypeMapper {
    /// Mapper using only the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper with user overrides layered over the built-in table.
    pub fn with_overrides(overrides: Vec<TypeOverride>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|o| (o.source_type.trim().to_uppercase(), o.target_type))
            .collect();
        Self { overrides }
    }

    /// Number of distinct override keys.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    fn lookup_exact(&self, key: &str) -> Option<(String, MappingOrigin)> {
        if let Some(target) = self.overrides.get(key) {
            return Some((target.clone(), MappingOrigin::Override));
        }
        lookup(key).map(|bq| (bq.to_string(), MappingOrigin::Builtin))
    }

    /// Resolve a declared column type, trying the full declaration before its base type.
    pub fn resolve(&self, declared: &str) -> TypeResolution {
        let normalized = declared.trim().to_uppercase();
        let base = base_type(declared);

        let (target_type, origin) = self
            .lookup_exact(&normalized)
            .or_else(|| self.lookup_exact(&base))
            .unwrap_or_else(|| (DEFAULT_TYPE.to_string(), MappingOrigin::Default));

        TypeResolution {
            source_type: declared.to_string(),
            base_type: base,
            target_type,
            origin,
        }
    }

    /// Target type name for a declared column type.
    pub fn map_type(&self, declared: &str) -> String {
        self.resolve(declared).target_type
    }

    /// Effective table, overrides applied, sorted by source type.
    pub fn mappings(&self) -> Vec<TypeOverride> {
        let mut merged: HashMap<String, String> = SYBASE_TYPE_MAPPINGS
            .iter()
            .map(|(name, bq)| (name.to_string(), bq.to_string()))
            .collect();
        for (source, target) in &self.overrides {
            merged.insert(source.clone(), target.clone());
        }

        let mut list: Vec<TypeOverride> = merged
            .into_iter()
            .map(|(source_type, target_type)| TypeOverride {
                source_type,
                target_type,
            })
            .collect();
        list.sort_by(|a, b| a.source_type.cmp(&b.source_type));
        list
    }
}
