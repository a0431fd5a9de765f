//! Loosely structured node-graph model for the `nodes` column.
//!
//! Workflow nodes vary in shape by type; only `type` and `parameters.text`
//! are ever inspected or written here, so everything else is carried through
//! a flattened map and re-serialized untouched.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tag of the AI-agent node whose input expression gets repaired.
pub const AGENT_NODE_TYPE: &str = "@n8n/n8n-nodes-langchain.agent";

/// One step in a workflow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,

    /// Every field this tool does not understand, preserved verbatim.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Node {
    pub fn is_agent(&self) -> bool {
        self.kind.as_deref() == Some(AGENT_NODE_TYPE)
    }

    /// Current input expression, if `parameters.text` is set to a string.
    pub fn input_text(&self) -> Option<&str> {
        self.parameters.as_ref()?.get("text")?.as_str()
    }

    /// Overwrite `parameters.text`, creating the parameters map if absent.
    pub fn set_input_text(&mut self, expr: &str) {
        self.parameters
            .get_or_insert_with(Map::new)
            .insert("text".to_string(), Value::String(expr.to_string()));
    }
}

/// Parse the serialized node array of a workflow row.
pub fn parse_nodes(doc: &str) -> Result<Vec<Node>> {
    Ok(serde_json::from_str(doc)?)
}

/// Re-serialize the full node list for writing back to the row.
pub fn serialize_nodes(nodes: &[Node]) -> Result<String> {
    Ok(serde_json::to_string(nodes)?)
}

/// First node of the AI-agent type, in document order.
pub fn find_agent_mut(nodes: &mut [Node]) -> Option<&mut Node> {
    nodes.iter_mut().find(|n| n.is_agent())
}

/// Read-only counterpart of [`find_agent_mut`], used by the audit listing.
pub fn find_agent(nodes: &[Node]) -> Option<&Node> {
    nodes.iter().find(|n| n.is_agent())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"[
        {"type":"n8n-nodes-base.webhook","name":"Webhook","parameters":{"path":"job-desc"},"position":[0,0]},
        {"type":"@n8n/n8n-nodes-langchain.agent","name":"AI Agent","parameters":{"text":"={{ $json.jobUrl }}","promptType":"define"}},
        {"type":"@n8n/n8n-nodes-langchain.agent","name":"Second Agent","parameters":{"text":"other"}}
    ]"#;

    #[test]
    fn find_agent_returns_first_match_in_order() {
        let mut nodes = parse_nodes(DOC).unwrap();
        let agent = find_agent_mut(&mut nodes).unwrap();
        assert_eq!(agent.input_text(), Some("={{ $json.jobUrl }}"));
    }

    #[test]
    fn set_input_text_creates_parameters_when_absent() {
        let mut nodes =
            parse_nodes(r#"[{"type":"@n8n/n8n-nodes-langchain.agent","name":"AI Agent"}]"#)
                .unwrap();
        let agent = find_agent_mut(&mut nodes).unwrap();
        assert!(agent.parameters.is_none());
        agent.set_input_text("={{ $(\"Webhook\").item.json.body }}");
        assert_eq!(
            agent.input_text(),
            Some("={{ $(\"Webhook\").item.json.body }}")
        );
    }

    #[test]
    fn set_input_text_overwrites_existing_value() {
        let mut nodes = parse_nodes(DOC).unwrap();
        let agent = find_agent_mut(&mut nodes).unwrap();
        agent.set_input_text("new");
        agent.set_input_text("new");
        assert_eq!(agent.input_text(), Some("new"));
        let params = agent.parameters.as_ref().unwrap();
        // Unrelated parameter entries survive the overwrite
        assert_eq!(params.get("promptType"), Some(&Value::String("define".into())));
    }

    #[test]
    fn unknown_fields_round_trip_unchanged() {
        let mut nodes = parse_nodes(DOC).unwrap();
        find_agent_mut(&mut nodes).unwrap().set_input_text("x");
        let doc = serialize_nodes(&nodes).unwrap();
        let reparsed = parse_nodes(&doc).unwrap();

        let webhook = &reparsed[0];
        assert_eq!(webhook.kind.as_deref(), Some("n8n-nodes-base.webhook"));
        assert_eq!(
            webhook.rest.get("position"),
            Some(&serde_json::json!([0, 0]))
        );
        assert_eq!(
            webhook.parameters.as_ref().unwrap().get("path"),
            Some(&Value::String("job-desc".into()))
        );
    }

    #[test]
    fn node_without_type_never_matches() {
        let nodes = parse_nodes(r#"[{"name":"untyped"},{"name":"also untyped"}]"#).unwrap();
        assert!(find_agent(&nodes).is_none());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_nodes("{not json").is_err());
        assert!(parse_nodes(r#"{"type":"x"}"#).is_err(), "must be an array");
    }
}
