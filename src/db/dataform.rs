use std::fs;
use std::path::{Path, PathBuf};

use super::type_mapper::{TypeMapper, DEFAULT_TYPE};

/// Escape text for a single-quoted JS string literal.
fn js_string_body(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render the Dataform `includes/type_mappings.js` helper for the mapper's effective table.
pub fn render_include(mapper: &TypeMapper) -> String {
    let entries = mapper
        .mappings()
        .iter()
        .map(|m| {
            format!(
                "    '{}': '{}'",
                js_string_body(&m.source_type),
                js_string_body(&m.target_type)
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "// Sybase to BigQuery type mappings\n\
         function mapSybaseType(sybaseType) {{\n\
         \x20 const mappings = {{\n\
         {}\n\
         \x20 }};\n\
         \n\
         \x20 return mappings[sybaseType.toUpperCase()] || '{}';\n\
         }}\n\
         \n\
         module.exports = {{ mapSybaseType }};\n",
        entries, DEFAULT_TYPE
    )
}

/// Write the include under `<dataform_dir>/includes/`.
pub fn write_include(dataform_dir: &Path, mapper: &TypeMapper) -> std::io::Result<PathBuf> {
    let includes = dataform_dir.join("includes");
    fs::create_dir_all(&includes)?;
    let path = includes.join("type_mappings.js");
    fs::write(&path, render_include(mapper))?;
    log::info!("Created Dataform type mapping include at {}", path.display());
    Ok(path)
}
