//! The repair pass: descriptors, per-workflow application, and the summary.
//!
//! Each workflow's AI-agent node reads its input through an expression in
//! `parameters.text`. The webhook trigger delivers request data under
//! `$("Webhook").item`, so an agent configured with a bare `$json.*`
//! reference sees nothing. The built-in descriptors rewrite the expression
//! for each of the four stock workflows.

use crate::error::Result;
use crate::graph;
use crate::store::WorkflowStore;
use serde::Serialize;

/// One planned repair: which workflow, and what the agent input becomes.
#[derive(Debug, Clone, Serialize)]
pub struct FixDescriptor {
    /// Exact workflow name to target.
    pub workflow: String,
    /// Short operator-facing label.
    pub description: String,
    /// Replacement expression for the agent node's `parameters.text`.
    pub agent_input: String,
    /// Why this expression is the right one.
    pub explanation: String,
}

impl FixDescriptor {
    pub fn new(workflow: &str, description: &str, agent_input: &str, explanation: &str) -> Self {
        Self {
            workflow: workflow.to_string(),
            description: description.to_string(),
            agent_input: agent_input.to_string(),
            explanation: explanation.to_string(),
        }
    }
}

/// The built-in list covering the four stock workflows.
pub fn default_fixes() -> Vec<FixDescriptor> {
    vec![
        FixDescriptor::new(
            "Job Desc",
            "Job Description Processing",
            r#"={{ $("Webhook").item.json.body.jobUrl }}"#,
            "Reads jobUrl from webhook POST body",
        ),
        FixDescriptor::new(
            "Resume",
            "Resume PDF Processing",
            r#"={{ $("Webhook").item.binary.data }}"#,
            "Reads PDF file from webhook binary upload (field name: data)",
        ),
        FixDescriptor::new(
            "Cover Letter",
            "Cover Letter PDF Processing",
            r#"={{ $("Webhook").item.binary.data }}"#,
            "Reads PDF file from webhook binary upload (field name: data)",
        ),
        FixDescriptor::new(
            "Eval",
            "ATS Evaluation",
            r#"={{ $("Webhook").item.json.body }}"#,
            "Reads entire body with resume_text, cover_letter_text, job_description",
        ),
    ]
}

/// What happened to a single descriptor.
///
/// "Workflow not found" and "agent node not found" are expected-possible
/// outcomes, not errors; genuine store/parse failures surface as `Err` from
/// [`apply_fix`] instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixStatus {
    Fixed {
        /// Previous `parameters.text`, when one was set.
        previous: Option<String>,
    },
    WorkflowNotFound,
    AgentNodeNotFound,
    Error {
        message: String,
    },
}

impl FixStatus {
    pub fn is_fixed(&self) -> bool {
        matches!(self, FixStatus::Fixed { .. })
    }
}

/// Apply one descriptor: lookup, match, mutate, persist.
///
/// The write commits on its own; a later descriptor's failure never rolls
/// this one back.
pub fn apply_fix(store: &WorkflowStore, fix: &FixDescriptor) -> Result<FixStatus> {
    patch(store, fix, true)
}

/// Like [`apply_fix`] but stops before the write, reporting what would change.
pub fn preview_fix(store: &WorkflowStore, fix: &FixDescriptor) -> Result<FixStatus> {
    patch(store, fix, false)
}

fn patch(store: &WorkflowStore, fix: &FixDescriptor, write: bool) -> Result<FixStatus> {
    let Some(row) = store.workflow_by_name(&fix.workflow)? else {
        return Ok(FixStatus::WorkflowNotFound);
    };

    let mut nodes = graph::parse_nodes(&row.nodes)?;
    let Some(agent) = graph::find_agent_mut(&mut nodes) else {
        return Ok(FixStatus::AgentNodeNotFound);
    };

    let previous = agent.input_text().map(str::to_string);
    agent.set_input_text(&fix.agent_input);

    if write {
        let doc = graph::serialize_nodes(&nodes)?;
        store.update_nodes(row.id, &doc)?;
    }

    Ok(FixStatus::Fixed { previous })
}

/// Result of one descriptor inside a full pass.
#[derive(Debug, Serialize)]
pub struct FixEntry {
    pub workflow: String,
    pub description: String,
    #[serde(flatten)]
    pub status: FixStatus,
}

/// Tally for a full pass over a descriptor list.
#[derive(Debug, Serialize)]
pub struct FixReport {
    pub dry_run: bool,
    pub entries: Vec<FixEntry>,
    pub fixed: usize,
    pub failed: usize,
}

impl FixReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

/// Run every descriptor in order, never aborting on failure.
///
/// Errors from a descriptor are folded into its entry as
/// [`FixStatus::Error`]; the loop always completes and the report always
/// covers the full list.
pub fn run_fixes(store: &WorkflowStore, fixes: &[FixDescriptor], dry_run: bool) -> FixReport {
    let mut entries = Vec::with_capacity(fixes.len());
    let mut fixed = 0;
    let mut failed = 0;

    for fix in fixes {
        let attempt = if dry_run {
            preview_fix(store, fix)
        } else {
            apply_fix(store, fix)
        };
        let status = match attempt {
            Ok(status) => status,
            Err(e) => FixStatus::Error {
                message: e.to_string(),
            },
        };
        if status.is_fixed() {
            fixed += 1;
        } else {
            failed += 1;
        }
        entries.push(FixEntry {
            workflow: fix.workflow.clone(),
            description: fix.description.clone(),
            status,
        });
    }

    FixReport {
        dry_run,
        entries,
        fixed,
        failed,
    }
}

/// Read-only audit line for one workflow row.
#[derive(Debug, Serialize)]
pub struct WorkflowAudit {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub node_count: usize,
    /// Current agent input expression; `None` when the workflow has no agent
    /// node or the agent has no `text` parameter.
    pub agent_input: Option<String>,
    /// Set when the row's node document does not parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

/// List every workflow with its current agent input expression.
pub fn audit_workflows(store: &WorkflowStore) -> Result<Vec<WorkflowAudit>> {
    let mut audits = Vec::new();
    for row in store.list_workflows()? {
        let audit = match graph::parse_nodes(&row.nodes) {
            Ok(nodes) => WorkflowAudit {
                id: row.id,
                name: row.name,
                active: row.active,
                node_count: nodes.len(),
                agent_input: graph::find_agent(&nodes)
                    .and_then(|n| n.input_text())
                    .map(str::to_string),
                parse_error: None,
            },
            Err(e) => WorkflowAudit {
                id: row.id,
                name: row.name,
                active: row.active,
                node_count: 0,
                agent_input: None,
                parse_error: Some(e.to_string()),
            },
        };
        audits.push(audit);
    }
    Ok(audits)
}
