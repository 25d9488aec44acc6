use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use typedframe::config::ExprConfig;
use typedframe::rewrite::qualify_expression;
use typedframe::schema::{plan_migration, RecordDefinition};

/// TypedFrame - inspect record definitions and expression rewrites
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML file with expression rendering settings (defaults to environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Qualify bare field references in an expression with a table alias
    Qualify {
        /// Table alias to prefix
        #[arg(long)]
        alias: String,

        /// Field name to qualify (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// Expression text
        expr: String,
    },

    /// Validate a record definition and print its descriptor and bound fields
    Describe {
        definition: PathBuf,

        /// Qualify field references with this alias
        #[arg(long)]
        alias: Option<String>,
    },

    /// Print the field additions and removals between two record definitions
    Migrate { from: PathBuf, to: PathBuf },
}

fn load_config(path: Option<&PathBuf>) -> Result<ExprConfig> {
    let config = match path {
        Some(path) => ExprConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExprConfig::from_env().context("reading config from environment")?,
    };
    config.clone().install().context("installing config")?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize logger - defaults to WARN level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    log::debug!("active config: {:?}", config);

    match cli.command {
        Command::Qualify {
            alias,
            fields,
            expr,
        } => {
            println!("{}", qualify_expression(&expr, &alias, &fields[..]));
        }
        Command::Describe { definition, alias } => {
            let record = RecordDefinition::from_yaml_file(&definition)?;
            let shape = record.shape()?;
            println!("{}", serde_json::to_string_pretty(&shape.data_type())?);
            for field in record.bind(alias.as_deref())? {
                println!("{}\t{}\t{}", field.name, field.data_type, field.expr);
            }
        }
        Command::Migrate { from, to } => {
            let source = RecordDefinition::from_yaml_file(&from)?.shape()?;
            let target = RecordDefinition::from_yaml_file(&to)?.shape()?;
            let plan = plan_migration(&source.field_names(), &target.field_names());
            if plan.is_noop() {
                println!("{} and {} have the same fields", source.type_name, target.type_name);
            }
            for name in &plan.added {
                println!("+ {}", name);
            }
            for name in &plan.dropped {
                println!("- {}", name);
            }
        }
    }
    Ok(())
}
