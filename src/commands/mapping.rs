use crate::db::overrides::TypeOverride;
use crate::db::type_mapper::{MappingOrigin, TypeMapper, TypeResolution};

/// Resolve each declared Sybase type against the mapper.
pub fn map_types(mapper: &TypeMapper, source_types: &[String]) -> Vec<TypeResolution> {
    source_types
        .iter()
        .map(|source| {
            let resolution = mapper.resolve(source);
            if resolution.origin == MappingOrigin::Default {
                log::debug!(
                    "No mapping for type '{}', defaulting to {}",
                    source,
                    resolution.target_type
                );
            }
            resolution
        })
        .collect()
}

/// Return the effective mapping table.
pub fn list_mappings(mapper: &TypeMapper) -> Vec<TypeOverride> {
    mapper.mappings()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_types_preserves_order() {
        let mapper = TypeMapper::new();
        let input = vec!["bit".to_string(), "nosuchtype".to_string(), "image".to_string()];
        let out = map_types(&mapper, &input);

        let targets: Vec<&str> = out.iter().map(|r| r.target_type.as_str()).collect();
        assert_eq!(targets, vec!["BOOL", "STRING", "BYTES"]);
        assert_eq!(out[1].origin, MappingOrigin::Default);
    }

    #[test]
    fn test_resolution_serializes_to_json() {
        let mapper = TypeMapper::new();
        let out = map_types(&mapper, &["money".to_string()]);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json[0]["target_type"], "NUMERIC(19,4)");
        assert_eq!(json[0]["origin"], "Builtin");
    }

    #[test]
    fn test_list_mappings() {
        let list = list_mappings(&TypeMapper::new());
        assert_eq!(list.len(), 25);
        assert_eq!(list[0].source_type, "BIGINT");
    }
}
