//! Task Automator - Main Entry Point
//!
//! Parses the command line, runs the selected automations and commits once.
//! The actual implementation is in the `task_automator` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use task_automator::config::{END_OF_DAY, START_OF_DAY, WEEKLY_REVIEW};
use task_automator::{Automator, Config, RunLock, RunPlan, local_now, logging};

/// Task Automator - checklists, habit counters and task hygiene
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file
    file: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Copy the start-of-day checklist into the inbox
    #[arg(long)]
    start_of_day_checklist: bool,

    /// Copy the end-of-day checklist into the inbox
    #[arg(long)]
    end_of_day_checklist: bool,

    /// Copy the weekly review checklist into the inbox
    #[arg(long)]
    weekly_review_checklist: bool,

    /// Copy a checklist by configured key or project name (repeatable)
    #[arg(long = "checklist", value_name = "KEY_OR_PROJECT")]
    checklists: Vec<String>,

    /// Reset missed habits and increment completed ones
    #[arg(long)]
    update_habits: bool,

    /// Clear priorities of tasks not due today
    #[arg(long)]
    frequent_hygiene: bool,

    /// Recount timeboxes and relocate scheduled tasks
    #[arg(long)]
    rare_hygiene: bool,

    /// Enable git synchronization on commit
    #[arg(long)]
    sync_git: bool,

    /// Run everything but do not commit
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn plan(&self) -> RunPlan {
        let mut checklists = Vec::new();
        for (enabled, key) in [
            (self.start_of_day_checklist, START_OF_DAY),
            (self.end_of_day_checklist, END_OF_DAY),
            (self.weekly_review_checklist, WEEKLY_REVIEW),
        ] {
            if enabled {
                checklists.push(key.to_string());
            }
        }
        checklists.extend(self.checklists.iter().cloned());

        RunPlan {
            checklists,
            update_habits: self.update_habits,
            frequent_hygiene: self.frequent_hygiene,
            rare_hygiene: self.rare_hygiene,
        }
    }
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.as_deref())?;
    config.sync_git |= args.sync_git;
    logging::init(&config.log_level)?;

    let plan = args.plan();
    if plan.is_empty() {
        tracing::warn!("no operation selected, nothing to do");
        return Ok(());
    }

    let _lock = RunLock::acquire(&args.file)?;
    let mut automator = Automator::open(&args.file, config)?;

    for line in automator.run(&plan, local_now())? {
        println!("{}", line);
    }

    println!("{}", automator.finish(args.dry_run)?);
    Ok(())
}
