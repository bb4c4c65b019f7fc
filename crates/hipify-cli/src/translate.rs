//! Stage, translate, apply and restore a batch of files

use std::fs;

use anyhow::Context;
use hipify::{apply_plan, export_json, stage, StagedFile, SymbolTable, TranslationPlan, Translator};
use hipify_api::{SourceFile, TranslatorConfig};
use hipify_cuda::CudaFrontend;
use log::{error, info, warn};

use crate::app::Cli;

/// Run the whole flow; returns whether every planned edit was applied
pub fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = cli.translator_config()?;
    let frontend = CudaFrontend::with_config(config.clone());
    let symbols = SymbolTable::cuda_to_hip().with_overrides(&config.extra_symbols);

    let (staged, files) = stage_all(cli, &config);
    if files.is_empty() {
        warn!("No {} files to translate", config.source_extension);
        return Ok(true);
    }

    let mut plan = Translator::new(&frontend, &symbols, &config).translate(&files);
    log_accepted(&plan);

    let complete = if cli.dry_run {
        print_plan(&plan);
        for file in staged {
            if let Err(e) = file.discard() {
                error!("{e}");
            }
        }
        true
    } else {
        let outcomes = apply_plan(&mut plan, &files);
        for file in staged {
            match file.restore() {
                Ok(path) => info!("Translated {}", path.display()),
                Err(e) => error!("{e}"),
            }
        }
        outcomes.iter().all(|o| o.skipped.is_empty())
    };

    if let Some(path) = &cli.report {
        let json = export_json(&plan)?;
        fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    }

    let metrics = plan.metrics();
    info!(
        "{} files, {} edits accepted, {} rejected, {} applied, {} skipped in {:?}",
        metrics.files_attempted,
        metrics.edits_accepted,
        metrics.edits_rejected,
        metrics.edits_applied,
        metrics.apply_failures,
        metrics.total_time
    );
    Ok(complete)
}

/// Scratch copies and their loaded text; files that fail are reported and left out
fn stage_all(cli: &Cli, config: &TranslatorConfig) -> (Vec<StagedFile>, Vec<SourceFile>) {
    let mut staged = Vec::new();
    let mut files = Vec::new();

    for path in &cli.files {
        let file = match stage(path, config) {
            Ok(Some(file)) => file,
            Ok(None) => continue,
            Err(e) => {
                error!("{e}");
                continue;
            }
        };
        match file.load() {
            Ok(source) => {
                files.push(source);
                staged.push(file);
            }
            Err(e) => {
                error!("{e}");
                if let Err(e) = file.discard() {
                    error!("{e}");
                }
            }
        }
    }

    (staged, files)
}

fn log_accepted(plan: &TranslationPlan) {
    for (path, set) in plan.files() {
        for edit in set.iter() {
            info!("{}: {edit}", path.display());
        }
    }
}

fn print_plan(plan: &TranslationPlan) {
    for (path, set) in plan.files() {
        println!("{}: {} edits", path.display(), set.len());
        for edit in set.iter() {
            println!("  {edit}");
        }
    }
}
