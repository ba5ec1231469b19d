//! `st graph` — dependency graph rendering and analysis.
//!
//! One command covers the whole visualization surface: the ASCII level
//! report, DOT text, and SVG via the external renderer, optionally narrowed
//! to a focus item's neighborhood and annotated with bottleneck/stats
//! sections.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, ValueEnum};
use serde_json::json;

use strata_core::graph::{
    Bottleneck, CriticalPath, DepGraph, DepthAnalysis, Stats, bottlenecks, critical_path, levels,
    neighborhood, timeline,
};
use strata_core::model::{Kind, Status};
use strata_core::ports::{ImageFormat, ItemSource, render_image};
use strata_core::render::{render_dot, render_report};
use strata_core::snapshot::{ItemFilter, Snapshot};

use crate::graphviz::GraphvizRenderer;
use crate::output::{CliError, OutputMode, render};
use crate::store::JsonFileSource;

// ---------------------------------------------------------------------------
// Clap types
// ---------------------------------------------------------------------------

/// Output format for `st graph`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// ASCII level report.
    Ascii,
    /// DOT graph-description text.
    Dot,
    /// SVG image via the external renderer.
    Svg,
}

/// Arguments for `st graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Path to the work-item snapshot document.
    #[arg(long, default_value = "work_items.json")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = GraphFormat::Ascii)]
    pub format: GraphFormat,

    /// Write output to this path instead of stdout (required for svg).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only include items with this status.
    #[arg(long)]
    pub status: Option<String>,

    /// Only include items of this type.
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Only include items in this milestone.
    #[arg(long)]
    pub milestone: Option<String>,

    /// Keep completed items in the rendered set.
    #[arg(long)]
    pub include_completed: bool,

    /// Restrict to the dependency neighborhood of this item.
    #[arg(long)]
    pub focus: Option<String>,

    /// Append bottleneck analysis.
    #[arg(long)]
    pub bottlenecks: bool,

    /// Append summary statistics.
    #[arg(long)]
    pub stats: bool,

    /// Render only critical-path items.
    #[arg(long)]
    pub critical_path: bool,

    /// Deadline for the external renderer, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

// ---------------------------------------------------------------------------
// Command runner
// ---------------------------------------------------------------------------

/// Execute `st graph`.
pub fn run_graph(args: &GraphArgs, output: OutputMode) -> anyhow::Result<()> {
    let filter = build_filter(args)?;
    let items = JsonFileSource::new(&args.file).load()?;

    let filtered = filter.apply(&items);
    if filtered.is_empty() {
        return Err(CliError::with_details(
            "no work items match the current filters",
            "relax --status/--type/--milestone, or pass --include-completed",
            "no_match",
        )
        .into());
    }

    let snapshot = Snapshot::new(filtered)?;
    let snapshot = match &args.focus {
        Some(focus) => focus_snapshot(&snapshot, focus)?,
        None => snapshot,
    };

    let depths = DepthAnalysis::compute(&DepGraph::from_snapshot(&snapshot));
    let path = critical_path(&snapshot, &depths);
    let leveled = levels(&snapshot, &depths);
    let projection = timeline(&leveled);

    if output.is_json() {
        let stats = Stats::compute(&snapshot, &path);
        let found = bottlenecks(&snapshot);
        let payload = json!({
            "items": snapshot.len(),
            "critical_path": {
                "length": path.length,
                "ids": path.ids_ordered(&snapshot),
            },
            "levels": projection.levels,
            "levels_remaining": projection.levels_remaining,
            "stats": stats,
            "bottlenecks": found
                .iter()
                .map(|b| json!({"id": b.id, "blocks": b.blocks, "title": b.item.title}))
                .collect::<Vec<_>>(),
            "cycles_detected": depths.cycle_detected(),
        });
        return render(output, &payload, |_, _| Ok(()));
    }

    match args.format {
        GraphFormat::Ascii => {
            let mut text =
                render_report(&snapshot, &leveled, &path, &projection, args.critical_path);
            if args.bottlenecks {
                text.push('\n');
                text.push_str(&bottlenecks_section(&bottlenecks(&snapshot)));
            }
            if args.stats {
                text.push('\n');
                text.push_str(&stats_section(&Stats::compute(&snapshot, &path)));
            }
            emit(&text, args.output.as_ref())
        }
        GraphFormat::Dot => {
            let text = dot_text(&snapshot, &path, args.critical_path)?;
            emit(&text, args.output.as_ref())
        }
        GraphFormat::Svg => {
            let Some(out_path) = &args.output else {
                return Err(CliError::with_details(
                    "svg output requires --output <path>",
                    "pass --output diagram.svg",
                    "missing_output",
                )
                .into());
            };
            let text = dot_text(&snapshot, &path, args.critical_path)?;
            let renderer = GraphvizRenderer::new(Duration::from_secs(args.timeout));
            render_image(&renderer, &text, ImageFormat::Svg, out_path)?;
            println!("wrote {}", out_path.display());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_filter(args: &GraphArgs) -> anyhow::Result<ItemFilter> {
    let status = args
        .status
        .as_deref()
        .map(Status::from_str)
        .transpose()
        .map_err(|err| {
            CliError::with_details(
                err.to_string(),
                "valid statuses: not_started, in_progress, blocked, completed",
                "invalid_status",
            )
        })?;

    let kind = args
        .kind
        .as_deref()
        .map(Kind::from_str)
        .transpose()
        .map_err(|err| {
            CliError::with_details(
                err.to_string(),
                "valid types: feature, bug, refactor, security, integration_test, deployment",
                "invalid_type",
            )
        })?;

    Ok(ItemFilter {
        status,
        kind,
        milestone: args.milestone.clone(),
        include_completed: args.include_completed,
    })
}

/// Narrow the snapshot to the focus item's neighborhood.
fn focus_snapshot(snapshot: &Snapshot, focus: &str) -> anyhow::Result<Snapshot> {
    let graph = DepGraph::from_snapshot(snapshot);
    let neighbors = neighborhood(snapshot, &graph, focus)?;
    if neighbors.is_empty() {
        return Err(CliError::with_details(
            format!("focus item not found: {focus}"),
            "check the id against the snapshot document",
            "focus_not_found",
        )
        .into());
    }
    let items = neighbors.into_iter().cloned().collect();
    Ok(Snapshot::new(items)?)
}

/// DOT text for the snapshot, optionally restricted to critical-path items.
fn dot_text(
    snapshot: &Snapshot,
    path: &CriticalPath,
    critical_only: bool,
) -> anyhow::Result<String> {
    if !critical_only {
        return Ok(render_dot(snapshot, path));
    }
    let items = snapshot
        .items()
        .iter()
        .filter(|item| path.contains(&item.id))
        .cloned()
        .collect();
    let restricted = Snapshot::new(items)?;
    Ok(render_dot(&restricted, path))
}

fn bottlenecks_section(found: &[Bottleneck<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bottlenecks");
    if found.is_empty() {
        let _ = writeln!(out, "  (no item blocks two or more others)");
        return out;
    }
    for entry in found {
        let _ = writeln!(
            out,
            "  {} — blocks {} items ({})",
            entry.id, entry.blocks, entry.item.title
        );
    }
    out
}

fn stats_section(stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stats");
    let _ = writeln!(out, "  total: {}", stats.total);
    let _ = writeln!(
        out,
        "  completed: {}  in progress: {}  not started: {}  blocked: {}",
        stats.completed, stats.in_progress, stats.not_started, stats.blocked
    );
    let _ = writeln!(out, "  completion: {:.1}%", stats.completion_pct);
    let _ = writeln!(out, "  critical path length: {}", stats.critical_path_length);
    out
}

fn emit(text: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
