//! # dbml-gen-go-model
//!
//! Generates Go model code from a parsed DBML schema model.
//!
//! For every enum the generator writes `<name>.enum.go` with an integer type
//! and a const block. For every table it writes `<name>.go` with:
//!
//! - a struct with one tagged field per column,
//! - a column metadata struct and its populated instance,
//! - `AllColumns()` and `TableName()` accessors,
//! - a `<Type>Slice` alias.
//!
//! ## Example
//!
//! ```no_run
//! use dbml_gen::{Generator, GeneratorConfig, Schema};
//!
//! let schema = Schema::from_file("schema.yaml").unwrap();
//! let mut generator = Generator::new(GeneratorConfig::default());
//! generator.load(schema);
//! let written = generator.generate().unwrap();
//! println!("wrote {} files", written.len());
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;

pub use codegen::{generate, Generator};
pub use config::{GenerateOptions, GeneratorConfig};
pub use error::{GenError, Result};
pub use schema::{Column, ColumnSettings, Enum, EnumValue, Schema, Table};
