use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hipify_api::{ConflictPolicy, TranslatorConfig};

/// hipify - translate CUDA sources to HIP in place
#[derive(Debug, Parser)]
#[command(name = "hipify", version, about, long_about = None)]
pub struct Cli {
    /// CUDA source files (.cu) to translate.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// JSON translator configuration; absent fields keep their defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON report of planned edits, conflicts and metrics.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the planned edits without touching the originals.
    #[arg(long)]
    pub dry_run: bool,

    /// Files with syntax errors only get directive-level edits.
    #[arg(long)]
    pub strict: bool,

    /// How colliding edits are detected.
    #[arg(long, value_enum)]
    pub conflict_policy: Option<PolicyArg>,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Only edits on the identical span collide
    Exact,
    /// Any overlapping edits collide
    Overlap,
}

impl From<PolicyArg> for ConflictPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Exact => ConflictPolicy::ExactSpan,
            PolicyArg::Overlap => ConflictPolicy::Overlap,
        }
    }
}

impl Cli {
    /// Config file (or defaults) with command line overrides applied
    pub fn translator_config(&self) -> anyhow::Result<TranslatorConfig> {
        let mut config = match &self.config {
            Some(path) => TranslatorConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TranslatorConfig::default(),
        };
        if self.strict {
            config = config.with_tolerant(false);
        }
        if let Some(policy) = self.conflict_policy {
            config = config.with_conflict_policy(policy.into());
        }
        Ok(config)
    }
}
