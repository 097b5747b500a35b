//! Abstract Go source declarations and their printer.
//!
//! The generator builds a [`GoFile`] out of [`Decl`]s and never formats Go
//! text itself. Rendering follows gofmt layout: tab indentation, aligned
//! struct fields and composite literal keys.

use crate::codegen::fs_utils;
use crate::error::{GenError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};
use std::path::Path;

/// A Go type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    /// Predeclared type such as `int` or `string`.
    Builtin(&'static str),
    /// Type declared in the generated package.
    Named(String),
    /// Type from another package, e.g. `time.Time`.
    Qualified {
        package: &'static str,
        name: &'static str,
    },
    Slice(Box<GoType>),
}

impl GoType {
    pub fn named(name: impl Into<String>) -> Self {
        GoType::Named(name.into())
    }

    pub fn slice(elem: GoType) -> Self {
        GoType::Slice(Box::new(elem))
    }

    fn collect_imports(&self, imports: &mut BTreeSet<&'static str>) {
        match self {
            GoType::Qualified { package, .. } => {
                imports.insert(*package);
            }
            GoType::Slice(elem) => elem.collect_imports(imports),
            GoType::Builtin(_) | GoType::Named(_) => {}
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::Builtin(name) => f.write_str(name),
            GoType::Named(name) => f.write_str(name),
            GoType::Qualified { package, name } => write!(f, "{}.{}", package, name),
            GoType::Slice(elem) => write!(f, "[]{}", elem),
        }
    }
}

/// One struct field. Tags are keyed by tag name and print sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: GoType,
    pub tags: BTreeMap<String, String>,
    pub comment: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: BTreeMap::new(),
            comment: None,
        }
    }

    fn tag_literal(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .tags
            .iter()
            .map(|(key, value)| format!("{}:{}", key, quote(value)))
            .collect();
        Some(format!("`{}`", parts.join(" ")))
    }
}

/// Entry of a `const ( ... )` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstSpec {
    pub name: String,
    pub ty: Option<GoType>,
    pub value: Option<String>,
    pub comment: Option<String>,
}

/// Expression returned by a generated method.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    StrSlice(Vec<String>),
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// Line comment; multi-line text prints one `//` line per line.
    Comment(String),
    /// `type Name Underlying`
    Type { name: String, underlying: GoType },
    Struct { name: String, fields: Vec<Field> },
    Const(Vec<ConstSpec>),
    /// `var Name = TypeName{ Key: "value", ... }`
    StructVar {
        name: String,
        type_name: String,
        values: Vec<(String, String)>,
    },
    /// `func (*Receiver) Name() Returns { return Expr }`
    Method {
        receiver: String,
        name: String,
        returns: GoType,
        body: Expr,
    },
}

impl Decl {
    fn collect_imports(&self, imports: &mut BTreeSet<&'static str>) {
        match self {
            Decl::Type { underlying, .. } => underlying.collect_imports(imports),
            Decl::Struct { fields, .. } => {
                for field in fields {
                    field.ty.collect_imports(imports);
                }
            }
            Decl::Const(specs) => {
                for ty in specs.iter().filter_map(|spec| spec.ty.as_ref()) {
                    ty.collect_imports(imports);
                }
            }
            Decl::Method { returns, .. } => returns.collect_imports(imports),
            Decl::Comment(_) | Decl::StructVar { .. } => {}
        }
    }
}

/// A Go source file of one package.
#[derive(Debug, Clone, PartialEq)]
pub struct GoFile {
    pub package: String,
    /// Comment printed above the package clause.
    pub header: Option<String>,
    pub decls: Vec<Decl>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            header: None,
            decls: Vec::new(),
        }
    }

    pub fn push(&mut self, decl: Decl) {
        self.decls.push(decl);
    }

    /// Packages referenced by qualified types, sorted.
    pub fn imports(&self) -> BTreeSet<&'static str> {
        let mut imports = BTreeSet::new();
        for decl in &self.decls {
            decl.collect_imports(&mut imports);
        }
        imports
    }

    /// Render and write the file, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs_utils::write_file(path, self.to_string()).map_err(|e| GenError::io(path, e))
    }
}

impl fmt::Display for GoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            write_comment(f, "", header)?;
        }
        writeln!(f, "package {}", self.package)?;

        let imports = self.imports();
        match imports.len() {
            0 => {}
            1 => {
                for import in &imports {
                    write!(f, "\nimport {}\n", quote(import))?;
                }
            }
            _ => {
                writeln!(f, "\nimport (")?;
                for import in &imports {
                    writeln!(f, "\t{}", quote(import))?;
                }
                writeln!(f, ")")?;
            }
        }

        // Comments attach to the declaration that follows them.
        let mut after_comment = false;
        for decl in &self.decls {
            if !after_comment {
                writeln!(f)?;
            }
            after_comment = matches!(decl, Decl::Comment(_));
            write_decl(f, decl)?;
        }

        Ok(())
    }
}

fn write_decl(f: &mut impl Write, decl: &Decl) -> fmt::Result {
    match decl {
        Decl::Comment(text) => write_comment(f, "", text),
        Decl::Type { name, underlying } => writeln!(f, "type {} {}", name, underlying),
        Decl::Struct { name, fields } => write_struct(f, name, fields),
        Decl::Const(specs) => write_const(f, specs),
        Decl::StructVar {
            name,
            type_name,
            values,
        } => {
            if values.is_empty() {
                return writeln!(f, "var {} = {}{{}}", name, type_name);
            }
            writeln!(f, "var {} = {}{{", name, type_name)?;
            let width = values.iter().map(|(key, _)| key.len() + 1).max().unwrap_or(0);
            for (key, value) in values {
                writeln!(f, "\t{:<width$} {},", format!("{}:", key), quote(value))?;
            }
            writeln!(f, "}}")
        }
        Decl::Method {
            receiver,
            name,
            returns,
            body,
        } => {
            writeln!(f, "func (*{}) {}() {} {{", receiver, name, returns)?;
            match body {
                Expr::Str(value) => writeln!(f, "\treturn {}", quote(value))?,
                Expr::StrSlice(values) => {
                    let items: Vec<String> = values.iter().map(|v| quote(v)).collect();
                    writeln!(f, "\treturn []string{{{}}}", items.join(", "))?;
                }
            }
            writeln!(f, "}}")
        }
    }
}

fn write_struct(f: &mut impl Write, name: &str, fields: &[Field]) -> fmt::Result {
    if fields.is_empty() {
        return writeln!(f, "type {} struct{{}}", name);
    }

    let name_width = fields.iter().map(|field| field.name.len()).max().unwrap_or(0);
    let types: Vec<String> = fields.iter().map(|field| field.ty.to_string()).collect();
    let type_width = fields
        .iter()
        .zip(&types)
        .filter(|(field, _)| !field.tags.is_empty())
        .map(|(_, ty)| ty.len())
        .max()
        .unwrap_or(0);

    writeln!(f, "type {} struct {{", name)?;
    for (field, ty) in fields.iter().zip(&types) {
        if let Some(comment) = &field.comment {
            write_comment(f, "\t", comment)?;
        }
        match field.tag_literal() {
            Some(tags) => writeln!(
                f,
                "\t{:<nw$} {:<tw$} {}",
                field.name,
                ty,
                tags,
                nw = name_width,
                tw = type_width
            )?,
            None => writeln!(f, "\t{:<nw$} {}", field.name, ty, nw = name_width)?,
        }
    }
    writeln!(f, "}}")
}

fn write_const(f: &mut impl Write, specs: &[ConstSpec]) -> fmt::Result {
    if specs.is_empty() {
        return writeln!(f, "const ()");
    }

    writeln!(f, "const (")?;
    for spec in specs {
        let mut line = spec.name.clone();
        if let Some(ty) = &spec.ty {
            write!(line, " {}", ty)?;
        }
        if let Some(value) = &spec.value {
            write!(line, " = {}", value)?;
        }
        match &spec.comment {
            Some(comment) => writeln!(f, "\t{} // {}", line, single_line(comment))?,
            None => writeln!(f, "\t{}", line)?,
        }
    }
    writeln!(f, ")")
}

fn write_comment(f: &mut impl Write, indent: &str, text: &str) -> fmt::Result {
    for line in text.lines() {
        if line.is_empty() {
            writeln!(f, "{}//", indent)?;
        } else {
            writeln!(f, "{}// {}", indent, line)?;
        }
    }
    Ok(())
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Escape a string for use in Go interpreted string literals
pub fn escape_go_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn quote(s: &str) -> String {
    format!("\"{}\"", escape_go_string(s))
}
