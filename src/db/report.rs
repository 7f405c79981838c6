use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::type_mapper::{MappingOrigin, TypeResolution};

pub const REPORT_FILE_NAME: &str = "type_mapping_report.txt";

/// Errors from writing the unmapped-type report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct UnmappedEntry<'a> {
    base_type: &'a str,
    target_type: &'a str,
}

/// Source types that had no explicit mapping during a run, and what they fell back to.
#[derive(Debug, Clone, Default)]
pub struct TypeMappingReport {
    unmapped: BTreeMap<String, String>,
}

impl TypeMappingReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolution. Only default fallbacks are kept, once per base type.
    pub fn record(&mut self, resolution: &TypeResolution) {
        if resolution.origin != MappingOrigin::Default {
            return;
        }
        self.unmapped
            .entry(resolution.base_type.clone())
            .or_insert_with(|| resolution.target_type.clone());
    }

    /// True when every recorded type had an explicit mapping.
    pub fn is_empty(&self) -> bool {
        self.unmapped.is_empty()
    }

    /// Unmapped base types with their fallback target, sorted by base type.
    pub fn unmapped(&self) -> Vec<(String, String)> {
        self.unmapped
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Plain-text report as written to `type_mapping_report.txt`.
    pub fn render(&self) -> String {
        let mut out = String::from("Type Mapping Report\n\n");
        out.push_str(
            "The following Sybase base types were encountered during translation \
             but did not have explicit mappings in the built-in table or the \
             override file. They were defaulted as shown below.\n\n",
        );
        for (base, target) in &self.unmapped {
            out.push_str(&format!("{} -> {}\n", base, target));
        }
        out
    }

    /// Entries as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, ReportError> {
        let entries: Vec<UnmappedEntry> = self
            .unmapped
            .iter()
            .map(|(base_type, target_type)| UnmappedEntry {
                base_type,
                target_type,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Write the report into `dir`. Nothing is written when every type was mapped.
    pub fn write_to(&self, dir: &Path) -> Result<Option<PathBuf>, ReportError> {
        if self.is_empty() {
            return Ok(None);
        }
        fs::create_dir_all(dir)?;
        let path = dir.join(REPORT_FILE_NAME);
        fs::write(&path, self.render())?;
        log::info!("Wrote type mapping report to {}", path.display());
        Ok(Some(path))
    }
}
