//! Generator configuration.
//!
//! Values come from defaults, an optional YAML file, then CLI overrides:
//!
//! ```yaml
//! from: schema/
//! recursive: true
//! output_dir: model
//! package: model
//! field_tags: [db, json, gorm]
//! gen_table_name: true
//! ```

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_output_dir() -> PathBuf {
    PathBuf::from("model")
}

fn default_package() -> String {
    "model".to_string()
}

fn default_field_tags() -> Vec<String> {
    vec!["db".to_string(), "json".to_string()]
}

fn default_gen_table_name() -> bool {
    true
}

/// Settings consumed by [`crate::codegen::Generator`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Go package name of every generated file.
    #[serde(default = "default_package")]
    pub package: String,
    /// Struct tag names attached to every field. `gorm` gets `column:<name>`.
    #[serde(default = "default_field_tags")]
    pub field_tags: Vec<String>,
    /// Emit the `TableName()` accessor for tables.
    #[serde(default = "default_gen_table_name")]
    pub gen_table_name: bool,
    /// Singularize table and enum type names (`users` -> `User`).
    #[serde(default)]
    pub singular_type_names: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            package: default_package(),
            field_tags: default_field_tags(),
            gen_table_name: default_gen_table_name(),
            singular_type_names: false,
        }
    }
}

impl GeneratorConfig {
    /// Tag names with surrounding whitespace removed and blanks dropped.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.field_tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
    }
}

/// A whole invocation: where schemas come from plus generator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerateOptions {
    /// Schema file, or directory of schema files.
    #[serde(default)]
    pub from: PathBuf,
    /// Descend into sub-directories of `from`.
    #[serde(default)]
    pub recursive: bool,
    /// Keep enum types registered by earlier schema files.
    #[serde(default)]
    pub remember_aliases: bool,
    #[serde(flatten)]
    pub generator: GeneratorConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            from: PathBuf::new(),
            recursive: false,
            remember_aliases: false,
            generator: GeneratorConfig::default(),
        }
    }
}

impl GenerateOptions {
    /// Load options from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| GenError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Split a comma separated tag list, e.g. `db,json, gorm`.
pub fn parse_field_tags(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
