use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A type mapping override configured by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeOverride {
    pub source_type: String,
    pub target_type: String,
}

/// Errors from loading an override file.
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("Type mapping override file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Override file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse `SOURCE=TARGET` lines.
///
/// Blank lines and `#` comments are ignored, malformed lines are skipped with
/// a warning, and a repeated source type keeps its last target.
pub fn parse_overrides(text: &str) -> Vec<TypeOverride> {
    let mut overrides: Vec<TypeOverride> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            log::warn!("Skipping invalid type mapping line: {}", line);
            continue;
        };
        let key = key.trim().to_uppercase();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            log::warn!("Skipping incomplete type mapping line: {}", line);
            continue;
        }

        match overrides.iter_mut().find(|o| o.source_type == key) {
            Some(existing) => existing.target_type = value.to_string(),
            None => overrides.push(TypeOverride {
                source_type: key,
                target_type: value.to_string(),
            }),
        }
    }

    overrides
}

/// Read and parse an override file from disk.
pub fn load_overrides(path: &Path) -> Result<Vec<TypeOverride>, OverrideError> {
    if !path.exists() {
        return Err(OverrideError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let overrides = parse_overrides(&text);
    log::info!(
        "Loaded {} Sybase to BigQuery type overrides from {}",
        overrides.len(),
        path.display()
    );
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_simple_lines() {
        let parsed = parse_overrides("SMALL_IDENTIFIER=INT64\nAGE_RANGE=STRING\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].source_type, "SMALL_IDENTIFIER");
        assert_eq!(parsed[0].target_type, "INT64");
        assert_eq!(parsed[1].source_type, "AGE_RANGE");
    }

    #[test]
    fn test_parse_skips_comments_blanks_and_malformed() {
        let text = "# header\n\n   \nno_equals_here\n=INT64\nFOO=\n  bit = BOOL  \n";
        let parsed = parse_overrides(text);
        assert_eq!(
            parsed,
            vec![TypeOverride {
                source_type: "BIT".to_string(),
                target_type: "BOOL".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_uppercases_key_but_not_value() {
        let parsed = parse_overrides("uid=Bytes");
        assert_eq!(parsed[0].source_type, "UID");
        assert_eq!(parsed[0].target_type, "Bytes");
    }

    #[test]
    fn test_parse_value_may_contain_equals() {
        let parsed = parse_overrides("WEIRD=A=B");
        assert_eq!(parsed[0].target_type, "A=B");
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let parsed = parse_overrides("TEXT=STRING\ntext=JSON");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].target_type, "JSON");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("type_mappings.txt");
        fs::write(&path, "# overrides\nSYSNAME=STRING\n").unwrap();

        let loaded = load_overrides(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].source_type, "SYSNAME");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let result = load_overrides(&path);
        assert!(matches!(result, Err(OverrideError::NotFound(p)) if p == path));
    }
}
