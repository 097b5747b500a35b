//! Schema emitter: turns a loaded schema into Go source files.
//!
//! Enums are emitted before tables so that every enum type is registered by
//! the time a table column refers to it.

use crate::codegen::fs_utils;
use crate::codegen::go::{ConstSpec, Decl, Expr, Field, GoFile, GoType};
use crate::codegen::normalize::{first_letter_lower, go_name, go_type_name, normalize};
use crate::codegen::types::TypeRegistry;
use crate::config::{GenerateOptions, GeneratorConfig};
use crate::error::{GenError, Result};
use crate::schema::{discover_schema_files, Enum, Schema, Table};
use std::path::PathBuf;

/// Marker placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "Code generated by dbml-gen-go-model. DO NOT EDIT.";

/// Tag name whose value takes the `column:<name>` form.
pub const ORM_COLUMN_TAG: &str = "gorm";

/// Generator state for one or more runs.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    schema: Option<Schema>,
    types: TypeRegistry,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            schema: None,
            types: TypeRegistry::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn load(&mut self, schema: Schema) {
        self.schema = Some(schema);
    }

    /// Drop the loaded schema. Registered enum types survive only when
    /// `remember_aliases` is set.
    pub fn reset(&mut self, remember_aliases: bool) {
        self.schema = None;
        if !remember_aliases {
            self.types.clear();
        }
    }

    /// Emit every enum, then every table, of the loaded schema.
    ///
    /// Stops at the first failure. Returns the written paths in emission
    /// order.
    pub fn generate(&mut self) -> Result<Vec<PathBuf>> {
        let schema = self.schema.take().ok_or(GenError::NoSchema)?;
        let result = self.emit_schema(&schema);
        self.schema = Some(schema);
        result
    }

    fn emit_schema(&mut self, schema: &Schema) -> Result<Vec<PathBuf>> {
        fs_utils::ensure_dir(&self.config.output_dir)
            .map_err(|e| GenError::io(&self.config.output_dir, e))?;

        let mut written = Vec::with_capacity(schema.enums.len() + schema.tables.len());
        for e in &schema.enums {
            written.push(self.gen_enum(e)?);
        }
        for table in &schema.tables {
            written.push(self.gen_table(table)?);
        }
        Ok(written)
    }

    /// Write `<out>/<enum>.enum.go` and register the enum type.
    pub fn gen_enum(&mut self, e: &Enum) -> Result<PathBuf> {
        let file = self.render_enum(e);
        let type_name = go_type_name(&e.name, self.config.singular_type_names);

        tracing::debug!("Registering enum '{}' as {}", e.name, type_name);
        self.types.register(e.name.clone(), GoType::Named(type_name));

        let path = self.enum_path(e);
        file.save(&path)?;
        tracing::info!("Generated enum {}", path.display());
        Ok(path)
    }

    /// Write `<out>/<table>.go`. Nothing is written if a column type does
    /// not resolve.
    pub fn gen_table(&self, table: &Table) -> Result<PathBuf> {
        let file = self.render_table(table)?;
        let path = self.table_path(table);
        file.save(&path)?;
        tracing::info!("Generated table {}", path.display());
        Ok(path)
    }

    pub fn enum_path(&self, e: &Enum) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.enum.go", normalize(&e.name)))
    }

    pub fn table_path(&self, table: &Table) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.go", normalize(&table.name)))
    }

    /// Integer type plus a const block whose zero value is discarded, so the
    /// first enum value is 1.
    pub fn render_enum(&self, e: &Enum) -> GoFile {
        let type_name = go_type_name(&e.name, self.config.singular_type_names);

        let mut file = self.new_file();
        file.push(Decl::Comment(format!(
            "{} is generated type for enum '{}'",
            type_name,
            normalize(&e.name)
        )));
        file.push(Decl::Type {
            name: type_name.clone(),
            underlying: GoType::Builtin("int"),
        });

        let mut specs = Vec::with_capacity(e.values.len() + 1);
        specs.push(ConstSpec {
            name: "_".to_string(),
            ty: Some(GoType::Named(type_name)),
            value: Some("iota".to_string()),
            comment: None,
        });
        specs.extend(e.values.iter().map(|value| ConstSpec {
            name: go_name(&value.name),
            ty: None,
            value: None,
            comment: non_empty(&value.note),
        }));
        file.push(Decl::Const(specs));

        file
    }

    /// Struct, column metadata, accessors and slice alias for one table.
    ///
    /// All columns are visited even after a type fails to resolve; the first
    /// unsupported type is reported.
    pub fn render_table(&self, table: &Table) -> Result<GoFile> {
        let table_name = normalize(&table.name);
        let type_name = go_type_name(&table.name, self.config.singular_type_names);

        let mut fields = Vec::with_capacity(table.columns.len());
        let mut qualified = Vec::with_capacity(table.columns.len());
        let mut unsupported = None;

        for column in &table.columns {
            let field_name = go_name(&column.name);
            let column_name = normalize(&column.name);

            let Some(ty) = self.types.resolve(&column.column_type) else {
                if unsupported.is_none() {
                    unsupported = Some(GenError::UnsupportedType {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        type_name: column.column_type.clone(),
                    });
                }
                continue;
            };
            tracing::debug!("{}.{}: {} -> {}", table_name, column_name, column.column_type, ty);

            let mut field = Field::new(field_name.clone(), ty);
            field.comment = non_empty(&column.settings.note);
            for tag in self.config.tag_names() {
                let value = if tag == ORM_COLUMN_TAG {
                    format!("column:{}", column_name)
                } else {
                    column_name.clone()
                };
                field.tags.insert(tag.to_string(), value);
            }
            fields.push(field);

            qualified.push((field_name, format!("{}.{}", table_name, column_name)));
        }

        if let Some(err) = unsupported {
            return Err(err);
        }

        let metadata_type = format!("{}TableColumns", first_letter_lower(&type_name));

        let mut file = self.new_file();
        file.push(Decl::Struct {
            name: type_name.clone(),
            fields,
        });

        file.push(Decl::Comment(format!("table '{}' columns list struct", table_name)));
        file.push(Decl::Struct {
            name: metadata_type.clone(),
            fields: qualified
                .iter()
                .map(|(field_name, _)| Field::new(field_name.clone(), GoType::Builtin("string")))
                .collect(),
        });

        file.push(Decl::Comment(format!("table '{}' columns list info", table_name)));
        file.push(Decl::StructVar {
            name: format!("{}TableColumns", type_name),
            type_name: metadata_type,
            values: qualified.clone(),
        });

        file.push(Decl::Comment(format!(
            "AllColumns return list columns name for table '{}'",
            table_name
        )));
        file.push(Decl::Method {
            receiver: type_name.clone(),
            name: "AllColumns".to_string(),
            returns: GoType::slice(GoType::Builtin("string")),
            body: Expr::StrSlice(qualified.into_iter().map(|(_, name)| name).collect()),
        });

        if self.config.gen_table_name {
            file.push(Decl::Comment("TableName return table name".to_string()));
            file.push(Decl::Method {
                receiver: type_name.clone(),
                name: "TableName".to_string(),
                returns: GoType::Builtin("string"),
                body: Expr::Str(table_name),
            });
        }

        file.push(Decl::Type {
            name: format!("{}Slice", type_name),
            underlying: GoType::slice(GoType::Named(type_name)),
        });

        Ok(file)
    }

    fn new_file(&self) -> GoFile {
        let mut file = GoFile::new(self.config.package.clone());
        file.header = Some(GENERATED_HEADER.to_string());
        file
    }
}

fn non_empty(note: &str) -> Option<String> {
    if note.trim().is_empty() {
        None
    } else {
        Some(note.to_string())
    }
}

/// Generate Go sources for every schema file found under `options.from`.
///
/// One generator serves all files; between files it is reset, keeping enum
/// types only when `remember_aliases` is set.
pub fn generate(options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    let files = discover_schema_files(&options.from, options.recursive)?;
    tracing::info!("Found {} schema file(s) in {}", files.len(), options.from.display());

    let mut generator = Generator::new(options.generator.clone());
    let mut written = Vec::new();

    for path in files {
        tracing::info!("Loading schema {}", path.display());
        let schema = Schema::from_file(&path)?;

        generator.load(schema);
        written.extend(generator.generate()?);
        generator.reset(options.remember_aliases);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, EnumValue};

    fn role_enum() -> Enum {
        Enum {
            name: "role".to_string(),
            values: vec![
                EnumValue {
                    name: "admin".to_string(),
                    note: "full access".to_string(),
                },
                EnumValue {
                    name: "member".to_string(),
                    note: String::new(),
                },
                EnumValue {
                    name: "guest".to_string(),
                    note: String::new(),
                },
            ],
        }
    }

    fn users_table() -> Table {
        Table {
            name: "users".to_string(),
            columns: vec![
                Column::new("id", "int"),
                Column::new("full name", "varchar(255)").with_note("display name"),
                Column::new("role", "role"),
            ],
        }
    }

    #[test]
    fn test_enum_values_start_at_one() {
        let generator = Generator::new(GeneratorConfig::default());
        let file = generator.render_enum(&role_enum());

        let Some(Decl::Const(specs)) = file.decls.last() else {
            panic!("enum file should end with a const block");
        };
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        // iota: _ = 0, Admin = 1, Member = 2, Guest = 3
        assert_eq!(names, vec!["_", "Admin", "Member", "Guest"]);
        assert_eq!(specs[0].value.as_deref(), Some("iota"));
        assert_eq!(specs[1].comment.as_deref(), Some("full access"));
        assert_eq!(specs[2].comment, None);
    }

    #[test]
    fn test_render_enum_source() {
        let generator = Generator::new(GeneratorConfig::default());
        let out = generator.render_enum(&role_enum()).to_string();

        assert!(out.starts_with(&format!("// {}\npackage model\n", GENERATED_HEADER)));
        assert!(out.contains("// Role is generated type for enum 'role'\ntype Role int\n"));
        assert!(out.contains(
            "const (\n\t_ Role = iota\n\tAdmin // full access\n\tMember\n\tGuest\n)\n"
        ));
    }

    #[test]
    fn test_table_resolves_registered_enum() {
        let mut generator = Generator::new(GeneratorConfig::default());
        generator.types.register("role", GoType::named("Role"));

        let file = generator.render_table(&users_table()).unwrap();
        let Some(Decl::Struct { name, fields }) = file.decls.first() else {
            panic!("table file should start with the struct");
        };
        assert_eq!(name, "Users");
        assert_eq!(fields[2].ty, GoType::named("Role"));
        assert_eq!(fields[1].name, "FullName");
        assert_eq!(fields[1].comment.as_deref(), Some("display name"));
    }

    #[test]
    fn test_unregistered_enum_fails() {
        let generator = Generator::new(GeneratorConfig::default());
        let err = generator.render_table(&users_table()).unwrap_err();

        match err {
            GenError::UnsupportedType { type_name, column, .. } => {
                assert_eq!(type_name, "role");
                assert_eq!(column, "role");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_unsupported_type_is_reported() {
        let generator = Generator::new(GeneratorConfig::default());
        let table = Table {
            name: "things".to_string(),
            columns: vec![
                Column::new("a", "widget"),
                Column::new("b", "int"),
                Column::new("c", "gizmo"),
            ],
        };

        let err = generator.render_table(&table).unwrap_err();
        assert!(matches!(err, GenError::UnsupportedType { ref type_name, .. } if type_name == "widget"));
    }

    #[test]
    fn test_gorm_tag_uses_column_syntax() {
        let config = GeneratorConfig {
            field_tags: vec!["json".to_string(), " gorm".to_string()],
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config);
        let table = Table {
            name: "order items".to_string(),
            columns: vec![Column::new("unit price", "float")],
        };

        let file = generator.render_table(&table).unwrap();
        let Some(Decl::Struct { fields, .. }) = file.decls.first() else {
            panic!("table file should start with the struct");
        };
        assert_eq!(fields[0].tags["gorm"], "column:unit_price");
        assert_eq!(fields[0].tags["json"], "unit_price");
    }

    #[test]
    fn test_table_name_accessor_is_optional() {
        let config = GeneratorConfig {
            gen_table_name: false,
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config);
        let table = Table {
            name: "users".to_string(),
            columns: vec![Column::new("id", "int")],
        };

        let out = generator.render_table(&table).unwrap().to_string();
        assert!(!out.contains("TableName()"));
        assert!(out.contains("func (*Users) AllColumns() []string"));
    }

    #[test]
    fn test_singular_type_names() {
        let config = GeneratorConfig {
            singular_type_names: true,
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config);
        let table = Table {
            name: "categories".to_string(),
            columns: vec![Column::new("id", "int")],
        };

        let out = generator.render_table(&table).unwrap().to_string();
        assert!(out.contains("type Category struct"));
        assert!(out.contains("var CategoryTableColumns = categoryTableColumns{"));
        assert!(out.contains("type CategorySlice []Category"));
        assert!(out.contains("return \"categories\""));
    }

    #[test]
    fn test_generate_without_schema() {
        let mut generator = Generator::new(GeneratorConfig::default());
        assert!(matches!(generator.generate(), Err(GenError::NoSchema)));
    }

    #[test]
    fn test_reset_remember_aliases() {
        let mut generator = Generator::new(GeneratorConfig::default());
        generator.load(Schema::default());
        generator.types.register("role", GoType::named("Role"));

        generator.reset(true);
        assert!(generator.types().contains("role"));
        assert!(generator.schema.is_none());

        generator.reset(false);
        assert!(generator.types().is_empty());
    }
}
