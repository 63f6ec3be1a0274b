use crate::config::SiteConfig;
use crate::console::{BuildSummary, ConsoleHandle};
use crate::content::load_posts;
use crate::emit::{emit_all, FsEmitter};
use crate::errors::{BuildError, ProjectionError};
use crate::generator::generate;
use chrono::prelude::*;
use color_eyre::eyre::{Result, WrapErr};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::{sync::mpsc, time::Duration};
use tracing::{error, info};

pub const CONFIG_FILE: &str = "config.toml";
pub const POSTS_DIR: &str = "posts";

#[derive(Debug)]
pub struct BuildReport {
    pub documents: usize,
    pub total_items: usize,
    pub page_count: usize,
    pub skipped: Vec<ProjectionError>,
}

fn config_path(input_dir: &Path, config: Option<&Path>) -> PathBuf {
    match config {
        Some(path) => path.to_path_buf(),
        None => input_dir.join(CONFIG_FILE),
    }
}

/// One generation run from an input directory to a destination directory.
pub async fn build_site(
    input_dir: &Path,
    output_dir: &Path,
    config: Option<&Path>,
) -> Result<BuildReport, BuildError> {
    let site_config = SiteConfig::load(&config_path(input_dir, config)).await?;
    let loaded = load_posts(&input_dir.join(POSTS_DIR)).await?;
    let generation = generate(&loaded.items, &site_config)?;

    let mut skipped = loaded.skipped;
    skipped.extend(generation.skipped);

    let failures = emit_all(&FsEmitter::new(output_dir), &generation.documents).await;
    if !failures.is_empty() {
        return Err(BuildError::Emit { failures, skipped });
    }

    info!(
        documents = generation.documents.len(),
        output = %output_dir.display(),
        "build finished"
    );
    Ok(BuildReport {
        documents: generation.documents.len(),
        total_items: generation.total_items,
        page_count: generation.page_count,
        skipped,
    })
}

pub async fn run_build(
    console: &mut ConsoleHandle,
    input_dir: &Path,
    output_dir: &Path,
    config: Option<&Path>,
) -> Result<()> {
    let start = Utc::now();
    let report = match build_site(input_dir, output_dir, config).await {
        Ok(report) => report,
        Err(BuildError::Emit { failures, skipped }) => {
            for item in &skipped {
                console.log_warning(&format!("skipped {item}"))?;
            }
            for e in &failures {
                console.log(&format!("{e}: {}", e.path().display()))?;
            }
            return Err(BuildError::Emit { failures, skipped })
                .wrap_err("Could not write every document");
        }
        Err(e) => return Err(e).wrap_err(format!("Could not build {}", input_dir.display())),
    };

    for skipped in &report.skipped {
        console.log_warning(&format!("skipped {skipped}"))?;
    }
    console.log_summary(BuildSummary {
        documents: report.documents,
        items: report.total_items,
        pages: report.page_count,
        elapsed: (Utc::now() - start).num_milliseconds(),
    })?;
    Ok(())
}

pub async fn run_watch(
    console: &mut ConsoleHandle,
    input_dir: &Path,
    output_dir: &Path,
    config: Option<&Path>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_secs(1), None, tx)?;
    debouncer
        .watcher()
        .watch(input_dir, RecursiveMode::Recursive)?;

    console.log(&format!("watching: {}", input_dir.display()))?;
    console.log(&format!("building: {}", output_dir.display()))?;
    if let Err(report) = run_build(console, input_dir, output_dir, config).await {
        console.log_report(report)?;
    }

    let output_dir_abs = std::fs::canonicalize(output_dir).unwrap_or_else(|_| output_dir.to_path_buf());
    while let Ok(res) = rx.recv() {
        match res {
            Ok(events) => {
                // output written inside the watched tree must not retrigger
                if events.iter().all(|e| e.path.starts_with(&output_dir_abs)) {
                    continue;
                }
                console.log("change detected; building...")?;
                if let Err(report) = run_build(console, input_dir, output_dir, config).await {
                    console.log_report(report)?;
                }
            }
            Err(errors) => {
                for e in errors {
                    error!(error = %e, "watch error");
                }
            }
        }
    }

    Ok(())
}
