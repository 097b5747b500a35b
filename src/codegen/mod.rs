//! Go code generation from a schema model.
//!
//! The pipeline normalizes schema identifiers, resolves column types against
//! the builtin table and previously emitted enums, and emits one Go file per
//! enum and per table.

pub mod fs_utils;
pub mod generator;
pub mod go;
pub mod normalize;
pub mod types;

// Re-export key types
pub use generator::{generate, Generator, GENERATED_HEADER, ORM_COLUMN_TAG};
pub use go::{ConstSpec, Decl, Expr, Field, GoFile, GoType};
pub use types::TypeRegistry;
