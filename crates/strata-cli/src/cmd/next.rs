//! `st next` — pick the next work item to act on.
//!
//! In-progress work always wins over starting something new; among equally
//! eligible items the highest priority is chosen, earliest-listed on ties.
//! "Nothing available" is a normal answer with exit code 0, not an error.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use strata_core::ports::ItemSource;
use strata_core::schedule::select_next;
use strata_core::snapshot::Snapshot;

use crate::output::{OutputMode, render};
use crate::store::JsonFileSource;

/// Arguments for `st next`.
#[derive(Args, Debug)]
pub struct NextArgs {
    /// Path to the work-item snapshot document.
    #[arg(long, default_value = "work_items.json")]
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct NextPick {
    id: String,
    title: String,
    status: String,
    priority: String,
}

#[derive(Debug, Serialize)]
struct EmptyNext {
    message: String,
}

/// Execute `st next`.
pub fn run_next(args: &NextArgs, output: OutputMode) -> anyhow::Result<()> {
    let items = JsonFileSource::new(&args.file).load()?;
    let snapshot = Snapshot::new(items)?;

    match select_next(&snapshot) {
        Some(item) => {
            let pick = NextPick {
                id: item.id.clone(),
                title: item.title.clone(),
                status: item.status.to_string(),
                priority: item.priority.to_string(),
            };
            render(output, &pick, |pick, w| render_pick(pick, w))
        }
        None => {
            let empty = EmptyNext {
                message: "no work item is ready right now".to_string(),
            };
            render(output, &empty, |_, w| {
                writeln!(w, "(no work item is ready right now)")
            })
        }
    }
}

fn render_pick(pick: &NextPick, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Next item")?;
    writeln!(w, "{:-<72}", "")?;
    writeln!(w, "ID:       {}", pick.id)?;
    writeln!(w, "Title:    {}", pick.title)?;
    writeln!(w, "Status:   {}", pick.status)?;
    writeln!(w, "Priority: {}", pick.priority)
}
