//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

#[allow(dead_code)]
pub const PRO_KEY: &str = "DEMO-PRO";

/// A scratch working directory holding a schema and a dotenv file.
///
/// The binary runs with this directory as its cwd, so default artifact paths
/// land inside it.
pub struct Workspace {
    pub dir: TempDir,
}

/// Captured result of one env-validate invocation.
#[derive(Debug)]
pub struct RunResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn assert_success(&self) -> &Self {
        assert_eq!(
            self.code,
            Some(0),
            "expected exit 0\nstdout:\n{}\nstderr:\n{}",
            self.stdout,
            self.stderr
        );
        self
    }
}

impl Workspace {
    pub fn new(schema: &serde_json::Value, env: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join("schema.json"),
            serde_json::to_string_pretty(schema)?,
        )?;
        std::fs::write(dir.path().join(".env"), env)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Run env-validate in this workspace with the given arguments.
    pub fn run(&self, args: &[&str]) -> RunResult {
        let output = Command::new(env!("CARGO_BIN_EXE_env-validate"))
            .args(args)
            .current_dir(self.path())
            .env_remove("ENV_VALIDATE_LICENSE")
            .env_remove("RUST_LOG")
            .output()
            .expect("run env-validate");
        RunResult::from_output(output)
    }

    /// File names in the workspace other than the two inputs.
    pub fn artifacts(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path())
            .expect("read workspace")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name != "schema.json" && name != ".env")
            .collect();
        names.sort();
        names
    }
}

/// Schema used by most tests: two required fields, a port pattern, and an
/// enum.
pub fn app_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["DATABASE_URL", "PORT"],
        "properties": {
            "DATABASE_URL": { "type": "string" },
            "PORT": { "type": "string", "pattern": "^[0-9]+$" },
            "NODE_ENV": { "enum": ["development", "production", "test"] }
        }
    })
}
