//! CLI argument parsing for env-validate.
//!
//! The CLI is intentionally thin: it only collects paths and flags, and
//! `config::RunConfig` decides what they mean.
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default schema path, relative to the working directory.
pub const DEFAULT_SCHEMA_PATH: &str = "schema.json";

/// Default dotenv path, relative to the working directory.
pub const DEFAULT_ENV_PATH: &str = ".env";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "env-validate",
    version,
    about = "Validate .env files against JSON schema.",
    after_help = "Examples:\n  env-validate\n  env-validate schema.json .env --secrets\n  env-validate schema.json .env.production -l DEMO-PRO -f json\n  env-validate -l DEMO-PRO -f pdf --out-dir reports"
)]
pub struct RootArgs {
    /// JSON schema file
    #[arg(value_name = "SCHEMA", default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// .env file
    #[arg(value_name = "ENV", default_value = DEFAULT_ENV_PATH)]
    pub env: PathBuf,

    /// Pro license key (DEMO-PRO)
    #[arg(short, long, value_name = "KEY", env = "ENV_VALIDATE_LICENSE")]
    pub license: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Detect and mask secrets
    #[arg(long)]
    pub secrets: bool,

    /// Directory for exported reports
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Emit debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Csv,
    Pdf,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Table => "table",
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Pdf => "pdf",
        }
    }
}
