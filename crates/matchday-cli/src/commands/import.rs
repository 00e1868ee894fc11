use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::now_utc;
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use matchday_core::domain::ImportRun;
use matchday_core::dto::{ImportSummaryDto, OutcomeStatus};
use matchday_core::{run_with, IngestOutcome};
use matchday_ingest::{DriveExportSource, FileSource, PublishedSheetSource, RowSource};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// xlsx, xls, ods, csv, tsv or json file
    File(ImportFileArgs),
    /// Sheet published to the web as CSV
    Url(ImportUrlArgs),
    /// Google Sheets document exported through the Drive API
    Drive(ImportDriveArgs),
}

#[derive(Debug, Args)]
pub struct ImportFileArgs {
    pub path: PathBuf,
    /// Report the outcome without saving anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ImportUrlArgs {
    pub url: String,
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ImportDriveArgs {
    pub file_id: String,
    /// Bearer token; defaults to the variable named by `drive.token_env`
    #[arg(long)]
    pub token: Option<String>,
    #[arg(long)]
    pub dry_run: bool,
}

pub fn import_file(ctx: &Context<'_>, args: ImportFileArgs) -> Result<()> {
    let source = FileSource::new(&args.path)
        .with_context(|| format!("open schedule {}", args.path.display()))?;
    import_from(ctx, &source, args.dry_run)
}

pub fn import_url(ctx: &Context<'_>, args: ImportUrlArgs) -> Result<()> {
    let url = Url::parse(args.url.trim())
        .map_err(|err| invalid_input(format!("invalid url {}: {err}", args.url)))?;
    let source = PublishedSheetSource::new(url.to_string());
    import_from(ctx, &source, args.dry_run)
}

pub fn import_drive(ctx: &Context<'_>, args: ImportDriveArgs) -> Result<()> {
    let token_env = &ctx.config.drive.token_env;
    let token = match args.token {
        Some(token) => token,
        None => env::var(token_env).map_err(|_| {
            invalid_input(format!(
                "drive token missing: pass --token or set {token_env}"
            ))
        })?,
    };
    let source = DriveExportSource::new(args.file_id.trim().to_string(), token);
    import_from(ctx, &source, args.dry_run)
}

fn import_from(ctx: &Context<'_>, source: &dyn RowSource, dry_run: bool) -> Result<()> {
    let rows = source
        .fetch_rows()
        .with_context(|| format!("read rows from {}", source.label()))?;
    debug!(source = source.source_name(), rows = rows.len(), "rows fetched");

    let outcome = run_with(&rows, ctx.config.pipeline_options());
    let import = match &outcome {
        IngestOutcome::Success(report) if !dry_run => {
            let import = ImportRun::new(
                source.source_name(),
                source.label(),
                rows.len(),
                report.records.len(),
                now_utc(),
            );
            ctx.store
                .records()
                .replace_all(&import, &report.records)
                .with_context(|| "save records")?;
            Some(import)
        }
        _ => None,
    };
    let summary = ImportSummaryDto::from_outcome(&outcome, rows.len(), import);

    if ctx.json {
        print_json(&summary)?;
    } else {
        print_summary(&summary, dry_run);
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err(invalid_input(summary.message))
    }
}

fn print_summary(summary: &ImportSummaryDto, dry_run: bool) {
    let success = summary.status == OutcomeStatus::Success;
    if success {
        println!("{}", summary.message);
    }
    for skip in &summary.skipped {
        println!("  skipped row {}: {}", skip.index, skip.reason);
    }
    if success && dry_run {
        println!("dry run, nothing saved");
    } else if let Some(import) = &summary.import {
        println!("saved as import {}", import.id);
    }
}
