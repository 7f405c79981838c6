pub mod dataform;
pub mod overrides;
pub mod report;
pub mod type_mapper;

pub use overrides::{load_overrides, parse_overrides, OverrideError, TypeOverride};
pub use report::{ReportError, TypeMappingReport};
pub use type_mapper::{
    map_optional_type, map_type, BigQueryType, MappingOrigin, TypeMapper, TypeResolution,
};
