//! Run configuration resolved from CLI arguments.
//!
//! Everything downstream reads a `RunConfig` so license and format policy lives
//! in one place instead of being re-derived from raw flags.
use crate::cli::{Format, RootArgs};
use std::path::PathBuf;

/// The only license key that unlocks exports.
pub const PRO_LICENSE_KEY: &str = "DEMO-PRO";

/// Printed when a gated format is requested without a license.
pub const DEMO_MODE_NOTICE: &str = "🔓 DEMO MODE: Table only. Pro ($29 Gumroad): exports/PDF.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LicenseTier {
    Demo,
    Pro,
}

impl LicenseTier {
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(key) if key == PRO_LICENSE_KEY => LicenseTier::Pro,
            _ => LicenseTier::Demo,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub schema_path: PathBuf,
    pub env_path: PathBuf,
    pub format: Format,
    pub tier: LicenseTier,
    pub scan_secrets: bool,
    pub out_dir: PathBuf,
}

impl RunConfig {
    pub fn from_args(args: &RootArgs) -> Self {
        let tier = LicenseTier::from_key(args.license.as_deref());
        RunConfig {
            schema_path: args.schema.clone(),
            env_path: args.env.clone(),
            format: args.format,
            tier,
            // Pro runs always include the secret scan.
            scan_secrets: args.secrets || tier == LicenseTier::Pro,
            out_dir: args.out_dir.clone(),
        }
    }

    /// Table output is free; every other format needs the Pro tier.
    pub fn export_allowed(&self) -> bool {
        self.format == Format::Table || self.tier == LicenseTier::Pro
    }
}
