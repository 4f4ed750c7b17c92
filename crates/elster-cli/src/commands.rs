use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use elster_ai::RefinementClient;
use elster_cli::pipeline::{
    annotate_document, apply_ai_suggestions, pending_ai_items, refine_document,
};
use elster_ingest::{RewriteStats, TableDocument, align_columns, migrate_entries};
use elster_model::{AbbreviationTable, MetadataRegistry};
use elster_normalization::{expand_signal_name, refine_friendly_name};

use crate::cli::{AiRefineArgs, ExpandArgs, TableArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::TableReport;

/// Pause between AI batches.
const BATCH_PAUSE: Duration = Duration::from_secs(1);

pub fn run_expand(args: &ExpandArgs) -> Result<()> {
    let table = AbbreviationTable::builtin();
    let mut out = Table::new();
    out.set_header(vec![header_cell("Signal"), header_cell("Friendly name")]);
    apply_table_style(&mut out);
    for signal in &args.signals {
        let mut label = expand_signal_name(&table, signal);
        if !args.raw {
            label = refine_friendly_name(signal, &label);
        }
        out.add_row(vec![signal.clone(), label]);
    }
    println!("{out}");
    Ok(())
}

pub fn run_annotate(args: &TableArgs) -> Result<TableReport> {
    let mut doc = load_document(&args.file)?;
    let stats = annotate_document(&mut doc);
    info!(updated = stats.updated, total = stats.total, "annotated table");
    let output = write_document(&doc, args)?;
    Ok(rewrite_report(args.file.clone(), output, &stats))
}

pub fn run_refine(args: &TableArgs) -> Result<TableReport> {
    let mut doc = load_document(&args.file)?;
    let stats = refine_document(&mut doc);
    info!(updated = stats.updated, total = stats.total, "refined table");
    let output = write_document(&doc, args)?;
    Ok(rewrite_report(args.file.clone(), output, &stats))
}

pub fn run_ai_refine(args: &AiRefineArgs) -> Result<TableReport> {
    let mut client = RefinementClient::from_env().context("create OpenAI client")?;
    if let Some(model) = &args.model {
        client = client.with_model(model.clone());
    }

    let mut doc = load_document(&args.table.file)?;
    let mut items = pending_ai_items(&doc);
    if args.start_from > 0 {
        items.drain(..args.start_from.min(items.len()));
    }
    if let Some(max) = args.max_entries {
        items.truncate(max);
    }
    info!(
        entries = items.len(),
        model = client.model(),
        "reviewing friendly names"
    );

    let bar = ProgressBar::new(items.len() as u64);
    bar.set_style(progress_style());
    let mut suggestions = Vec::with_capacity(items.len());
    for (i, chunk) in items.chunks(args.batch_size.max(1)).enumerate() {
        // Pause between batches to stay under the API rate limit.
        if i > 0 {
            std::thread::sleep(BATCH_PAUSE);
        }
        suggestions.extend(client.refine_batch_lenient(chunk));
        bar.inc(chunk.len() as u64);
    }
    bar.finish_and_clear();

    let changed = apply_ai_suggestions(&mut doc, &items, &suggestions);
    let output = write_document(&doc, &args.table)?;
    let mut report = TableReport::new(args.table.file.clone(), output);
    report.push("Reviewed", items.len());
    report.push("Changed", changed);
    Ok(report)
}

pub fn run_format(args: &TableArgs) -> Result<TableReport> {
    let mut doc = load_document(&args.file)?;
    let reformatted = align_columns(&mut doc);
    debug!(reformatted, "aligned entry columns");
    let output = write_document(&doc, args)?;
    let mut report = TableReport::new(args.file.clone(), output);
    report.push("Reformatted", reformatted);
    Ok(report)
}

pub fn run_migrate(args: &TableArgs) -> Result<TableReport> {
    let mut doc = load_document(&args.file)?;
    let registry = MetadataRegistry::builtin();
    let stats = migrate_entries(&mut doc, &registry);
    info!(migrated = stats.migrated, total = stats.total, "migrated table");
    let output = write_document(&doc, args)?;
    let mut report = TableReport::new(args.file.clone(), output);
    report.push("Total", stats.total);
    report.push("Migrated", stats.migrated);
    report.push("With metadata", stats.with_metadata);
    report.push("Blacklisted", stats.blacklisted);
    report.push("Already migrated", stats.already_migrated);
    Ok(report)
}

fn load_document(path: &Path) -> Result<TableDocument> {
    TableDocument::read(path).with_context(|| format!("read table {}", path.display()))
}

/// Write the document to the output target, unless this is a dry run.
///
/// Returns the path written, or `None` for a dry run.
fn write_document(doc: &TableDocument, args: &TableArgs) -> Result<Option<PathBuf>> {
    if args.dry_run {
        return Ok(None);
    }
    let target = args.output.clone().unwrap_or_else(|| args.file.clone());
    doc.write(&target)
        .with_context(|| format!("write table {}", target.display()))?;
    Ok(Some(target))
}

fn rewrite_report(input: PathBuf, output: Option<PathBuf>, stats: &RewriteStats) -> TableReport {
    let mut report = TableReport::new(input, output);
    report.push("Total", stats.total);
    report.push("Updated", stats.updated);
    report.push("Unchanged", stats.unchanged);
    report.push("Blacklisted", stats.skipped_blacklisted);
    report.push("Same as signal", stats.skipped_same);
    report.push("No name field", stats.skipped_missing);
    report
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} entries {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}
