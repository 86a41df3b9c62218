use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod dotenv;
mod output;
mod render;
mod report;
mod schema;
mod secrets;

use cli::{Format, RootArgs};
use config::{RunConfig, DEMO_MODE_NOTICE};
use dotenv::EnvFile;
use schema::LoadedSchema;

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing(args.verbose);
    let config = RunConfig::from_args(&args);

    match run(&config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so report output on stdout stays clean. `RUST_LOG`
/// overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &RunConfig) -> Result<ExitCode> {
    if !config.export_allowed() {
        println!("{DEMO_MODE_NOTICE}");
        return Ok(ExitCode::SUCCESS);
    }

    let (schema, env) = match load_inputs(config) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("Error reading files: {err:#}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let compiled = schema.compile()?;
    let violations = compiled.violations(&env.to_json());
    let report = report::build(&schema, &env, &violations, config.scan_secrets);

    if report.is_empty() {
        println!("✅ All good! No issues.");
        return Ok(ExitCode::SUCCESS);
    }

    match config.format {
        Format::Table => print!("{}", render::render_table(&report)),
        Format::Json => export(config, &render::render_json(&report)?)?,
        Format::Csv => export(config, &render::render_csv(&report))?,
        Format::Pdf => {
            let html = render::render_html(&report, &schema.name);
            let path = output::write_pdf(&config.out_dir, &html)?;
            println!("📄 PDF saved: {}", output::display_path(&config.out_dir, &path));
        }
    }

    if !report.schema_valid {
        println!("❌ {} issues found.", report.len());
    }
    Ok(ExitCode::SUCCESS)
}

fn export(config: &RunConfig, contents: &str) -> Result<()> {
    let path = output::write_export(&config.out_dir, config.format, contents)?;
    println!(
        "📄 Exported to {}",
        output::display_path(&config.out_dir, &path)
    );
    Ok(())
}

fn load_inputs(config: &RunConfig) -> Result<(LoadedSchema, EnvFile)> {
    let schema = schema::load(&config.schema_path)?;
    let env = dotenv::read(&config.env_path)?;
    if env.is_empty() {
        tracing::warn!(path = %config.env_path.display(), "env file has no assignments");
    }
    tracing::debug!(
        schema = %schema.name,
        required = schema.required().len(),
        env_entries = env.len(),
        "inputs loaded"
    );
    Ok((schema, env))
}
