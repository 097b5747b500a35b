//! Schema model consumed by the generator.
//!
//! The model mirrors what a DBML parser produces: ordered enums and ordered
//! tables. It is read from YAML or JSON documents, e.g.
//!
//! ```yaml
//! enums:
//!   - name: role
//!     values:
//!       - name: admin
//!         note: full access
//!       - name: member
//! tables:
//!   - name: users
//!     columns:
//!       - name: id
//!         type: int
//!       - name: role
//!         type: role
//!         settings:
//!           note: granted role
//! ```

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed schema: enums and tables in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Schema {
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub settings: ColumnSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ColumnSettings {
    #[serde(default)]
    pub note: String,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            settings: ColumnSettings::default(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.settings.note = note.into();
        self
    }
}

impl Schema {
    /// Parse a schema from YAML text. JSON is accepted too, being valid YAML.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| GenError::Yaml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a schema file, choosing the parser from the file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            return serde_json::from_str(&content).map_err(|source| GenError::Json {
                path: path.to_path_buf(),
                source,
            });
        }

        Self::from_yaml_str(&content, path)
    }
}

fn is_schema_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml" | "json")
    )
}

/// Collect schema files under `input`.
///
/// A file path is returned as-is. For a directory, every `.yaml`, `.yml` and
/// `.json` file is returned sorted by path; sub-directories are only visited
/// when `recursive` is set.
pub fn discover_schema_files<P: AsRef<Path>>(input: P, recursive: bool) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(GenError::InvalidInput(format!(
            "path does not exist: {}",
            input.display()
        )));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(GenError::InvalidInput(format!(
            "path is neither a file nor a directory: {}",
            input.display()
        )));
    }

    let mut files = Vec::new();
    collect_dir(input, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    let read_dir = fs::read_dir(dir).map_err(|e| GenError::io(dir, e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| GenError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                collect_dir(&path, recursive, files)?;
            }
        } else if is_schema_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
enums:
  - name: role
    values:
      - name: admin
        note: full access
      - name: member
tables:
  - name: users
    columns:
      - name: id
        type: int
      - name: role
        type: role
        settings:
          note: granted role
"#;

    #[test]
    fn test_parse_yaml_schema() {
        let schema = Schema::from_yaml_str(SAMPLE, Path::new("sample.yaml")).unwrap();

        assert_eq!(schema.enums.len(), 1);
        assert_eq!(schema.enums[0].values[0].note, "full access");
        assert_eq!(schema.enums[0].values[1].note, "");

        let users = &schema.tables[0];
        assert_eq!(users.columns[0], Column::new("id", "int"));
        assert_eq!(users.columns[1], Column::new("role", "role").with_note("granted role"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let schema = Schema::from_yaml_str("tables: []", Path::new("x.yaml")).unwrap();
        assert!(schema.enums.is_empty());
        assert!(schema.tables.is_empty());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Schema::from_yaml_str("tables: [", Path::new("broken.yaml")).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_discover_missing_path() {
        let err = discover_schema_files("/definitely/not/here", false).unwrap_err();
        assert!(matches!(err, GenError::InvalidInput(_)));
    }
}
