//! dbml-gen-go-model CLI - generate Go models from schema model files
//!
//! Reads a schema file (or a directory of them) and writes one Go file per
//! enum and per table into the output directory.

use clap::Parser;
use dbml_gen::config::parse_field_tags;
use dbml_gen::GenerateOptions;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dbml-gen-go-model")]
#[command(version, about = "Generate Go model structs and enums from a schema model", long_about = None)]
struct Cli {
    /// YAML config file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Schema file or directory of schema files (.yaml, .yml, .json)
    #[arg(short, long)]
    from: Option<PathBuf>,

    /// Output directory for generated Go files
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Go package name
    #[arg(short, long)]
    package: Option<String>,

    /// Comma separated struct tag names, e.g. db,json,gorm
    #[arg(short = 't', long)]
    fieldtags: Option<String>,

    /// Emit the TableName() accessor
    #[arg(long)]
    gen_table_name: Option<bool>,

    /// Singularize type names (users -> User)
    #[arg(long)]
    singular: bool,

    /// Scan sub-directories of --from
    #[arg(short, long)]
    recursive: bool,

    /// Keep enum types from earlier schema files when processing later ones
    #[arg(long)]
    remember_alias: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_options(self) -> Result<GenerateOptions, dbml_gen::GenError> {
        let mut options = match &self.config {
            Some(path) => GenerateOptions::from_file(path)?,
            None => GenerateOptions::default(),
        };

        if let Some(from) = self.from {
            options.from = from;
        }
        if let Some(out) = self.out {
            options.generator.output_dir = out;
        }
        if let Some(package) = self.package {
            options.generator.package = package;
        }
        if let Some(tags) = self.fieldtags {
            options.generator.field_tags = parse_field_tags(&tags);
        }
        if let Some(gen_table_name) = self.gen_table_name {
            options.generator.gen_table_name = gen_table_name;
        }
        options.generator.singular_type_names |= self.singular;
        options.recursive |= self.recursive;
        options.remember_aliases |= self.remember_alias;

        if options.from.as_os_str().is_empty() {
            return Err(dbml_gen::GenError::InvalidInput(
                "no schema input given, use --from or set `from` in the config file".to_string(),
            ));
        }

        Ok(options)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = match cli.into_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    match dbml_gen::generate(&options) {
        Ok(written) => {
            println!(
                "✨ Generated {} file(s) in {}",
                written.len(),
                options.generator.output_dir.display()
            );
        }
        Err(e) => {
            eprintln!("❌ Generation failed: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("   caused by: {}", cause);
                source = cause.source();
            }
            process::exit(1);
        }
    }
}
