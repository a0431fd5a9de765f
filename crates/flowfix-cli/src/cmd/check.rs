use crate::output::{print_json, print_table};
use flowfix_core::fix::audit_workflows;
use std::path::Path;

pub fn run(db: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (path, store) = super::open_store(db)?;
    let audits = audit_workflows(&store)?;

    if json {
        #[derive(serde::Serialize)]
        struct CheckOutput<'a> {
            store: String,
            workflows: &'a [flowfix_core::fix::WorkflowAudit],
        }
        return print_json(&CheckOutput {
            store: path.display().to_string(),
            workflows: &audits,
        });
    }

    println!("Store: {}", path.display());

    if audits.is_empty() {
        println!("No workflows in store.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = audits
        .iter()
        .map(|a| {
            let input = match (&a.parse_error, &a.agent_input) {
                (Some(e), _) => format!("(unparseable: {e})"),
                (None, Some(expr)) => expr.clone(),
                (None, None) => "(no agent input)".to_string(),
            };
            vec![
                a.id.to_string(),
                a.name.clone(),
                (if a.active { "yes" } else { "no" }).to_string(),
                a.node_count.to_string(),
                input,
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "ACTIVE", "NODES", "AGENT INPUT"], rows);

    Ok(())
}
