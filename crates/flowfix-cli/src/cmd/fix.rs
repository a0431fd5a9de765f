use crate::output::print_json;
use flowfix_core::fix::{default_fixes, run_fixes, FixStatus};
use std::path::Path;

pub fn run(db: Option<&Path>, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let (path, store) = super::open_store(db)?;

    let fixes = default_fixes();
    tracing::debug!(store = %path.display(), count = fixes.len(), dry_run, "starting fix pass");
    let report = run_fixes(&store, &fixes, dry_run);

    if json {
        return print_json(&report);
    }

    println!("n8n workflow input fixer");
    println!("Store: {}", path.display());

    for (fix, entry) in fixes.iter().zip(&report.entries) {
        println!();
        println!("{} ({})", entry.workflow, entry.description);
        match &entry.status {
            FixStatus::Fixed { previous } => {
                println!("  current: {}", previous.as_deref().unwrap_or("(not set)"));
                println!("  new:     {}", fix.agent_input);
                println!("  why:     {}", fix.explanation);
                if dry_run {
                    println!("  would fix (dry run)");
                } else {
                    println!("  fixed");
                }
            }
            FixStatus::WorkflowNotFound => println!("  workflow not found"),
            FixStatus::AgentNodeNotFound => println!("  AI agent node not found"),
            FixStatus::Error { message } => println!("  error: {message}"),
        }
    }

    println!();
    println!(
        "Fixed: {}  Failed: {}  Total: {}",
        report.fixed,
        report.failed,
        report.total()
    );

    if report.failed > 0 {
        println!("Some workflows were not fixed; see above.");
    } else if !dry_run {
        println!("All workflows fixed. Restart n8n to pick up the changes.");
    }

    Ok(())
}
