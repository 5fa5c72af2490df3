//! Integration tests for Flowbridge
//!
//! End-to-end conversions from raw workflow exports to serialized graphs.
//!
mod common;
use common::*;
use flowbridge::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_webhook_node() {
        let raw = workflow("Hook", vec![node("w1", "Hook", "n8n-nodes-base.webhook")], json!({}));
        let graph = convert_workflow(&raw).expect("webhook workflow converts");

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].node_type, "trigger/webhook");
        assert_eq!(graph.nodes[0].id, "trigger/webhook_w1");
        assert!(graph.links.is_empty());
        assert!(graph.groups.is_empty());
    }

    #[test]
    fn test_unknown_node_only() {
        let raw = workflow("Unknown", vec![node("1", "X", "acme.frobnicator")], json!({}));
        let graph = convert_workflow(&raw).expect("unsupported nodes are not fatal");

        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());

        let stats = get_conversion_stats(&raw);
        assert_eq!(stats.unsupported_nodes, 1);
        assert_eq!(stats.conversion_confidence, 0.0);
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(normalize(&json!({})).is_none());

        match convert_workflow(&json!({})) {
            Err(ConvertError::InvalidWorkflow(message)) => assert!(message.contains("nodes")),
            other => panic!("Expected InvalidWorkflow, got {:?}", other),
        }
        assert!(convert_workflow(&json!({ "nodes": "many" })).is_err());
        assert!(convert_workflow(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_empty_workflow_converts_to_empty_graph() {
        let graph = convert_workflow(&json!({ "nodes": [] })).unwrap();
        assert_eq!(graph, TargetGraph::default());
    }

    #[test]
    fn test_branching_workflow() {
        let graph = convert_workflow(&branching_workflow()).unwrap();

        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "trigger/webhook_1",
                "action/http_request_2",
                "logic/condition_3",
                "integration/slack_4",
            ]
        );

        let fetch = graph.node("action/http_request_2").unwrap();
        assert_eq!(
            serde_json::Value::Object(fetch.properties.clone()),
            json!({ "url": "https://example.com/api", "method": "GET" })
        );
        let notify = graph.node("integration/slack_4").unwrap();
        assert_eq!(notify.properties["message"], json!("{{ $json.title }}"));
        assert_eq!(notify.properties["channel"], json!("#alerts"));
    }

    #[test]
    fn test_graph_invariants_hold() {
        let fixtures = vec![
            branching_workflow(),
            workflow(
                "Dupes",
                vec![
                    node("1", "Same", "n8n-nodes-base.code"),
                    node("2", "Same", "n8n-nodes-base.code"),
                    node("3", "Other", "acme.httpClient"),
                ],
                json!({
                    "Same": { "main": [[link_to("Other", 0)]] },
                    "Other": { "main": [[link_to("Same", 0)]] }
                }),
            ),
        ];

        for raw in fixtures {
            let graph = convert_workflow(&raw).unwrap();
            let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(ids.len(), graph.nodes.len(), "node ids must be unique");
            let link_ids: HashSet<_> = graph.links.iter().map(|l| l.id.as_str()).collect();
            assert_eq!(link_ids.len(), graph.links.len(), "link ids must be unique");
            for link in &graph.links {
                assert!(ids.contains(link.origin_id.as_str()));
                assert!(ids.contains(link.target_id.as_str()));
            }
        }
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_node() {
        let raw = workflow(
            "Dupes",
            vec![
                node("1", "Step", "n8n-nodes-base.code"),
                node("2", "Step", "n8n-nodes-base.set"),
                node("3", "End", "n8n-nodes-base.noOp"),
            ],
            json!({ "Step": { "main": [[link_to("End", 0)]] } }),
        );

        let graph = convert_workflow(&raw).unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].origin_id, "transform/code_1");

        let strict = WorkflowConverter::builder()
            .with_duplicate_names(DuplicateNamePolicy::Reject)
            .build();
        assert_eq!(
            strict.convert(&raw),
            Err(ConvertError::DuplicateNodeName {
                name: "Step".to_string(),
                first_id: "transform/code_1".to_string(),
                second_id: "transform/set_variable_2".to_string(),
            })
        );
    }

    #[test]
    fn test_nodes_without_usable_id_are_dropped() {
        let raw = json!({
            "nodes": [
                { "name": "No id", "type": "n8n-nodes-base.code" },
                node("1", "First", "n8n-nodes-base.code"),
                node("1", "Second", "n8n-nodes-base.code"),
                "garbage"
            ]
        });
        let graph = convert_workflow(&raw).unwrap();

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].title, "First");
    }

    #[test]
    fn test_source_metadata() {
        let raw = branching_workflow();

        let graph = convert_workflow(&raw).unwrap();
        assert_eq!(graph.extra.source_metadata.original_name.as_deref(), Some("Branching"));
        assert_eq!(graph.extra.source_metadata.imported_at, None);

        let graph = WorkflowConverter::default()
            .convert_at(&raw, "2024-05-01T12:00:00Z")
            .unwrap();
        assert_eq!(
            graph.extra.source_metadata.imported_at.as_deref(),
            Some("2024-05-01T12:00:00Z")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let raw = workflow(
            "Pair",
            vec![
                node("1", "A", "n8n-nodes-base.httpRequest"),
                node("2", "B", "n8n-nodes-base.slack"),
            ],
            json!({ "A": { "main": [[link_to("B", 0)]] } }),
        );
        let graph = convert_workflow(&raw).unwrap();
        let value = serde_json::to_value(&graph).unwrap();

        assert_eq!(value["extra"]["sourceMetadata"]["originalName"], json!("Pair"));
        assert_eq!(value["groups"], json!([]));
        assert_eq!(value["nodes"][0]["type"], json!("action/http_request"));
        assert_eq!(value["nodes"][0]["inputs"][0], json!({ "name": "input", "type": "object", "link": null }));
        assert_eq!(value["links"][0]["type"], json!("main"));
        assert_eq!(value["links"][0]["target_slot"], json!(0));

        let back: TargetGraph = serde_json::from_value(value).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let raw = json!({ "name": "Raw", "nodes": [node("1", "A", "n8n-nodes-base.code")] });
        let before = raw.clone();
        convert_workflow(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn test_concurrent_conversions_share_one_converter() {
        let converter = WorkflowConverter::default();
        let raw = branching_workflow();
        let expected = converter.convert(&raw).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| converter.convert(&raw).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_prelude_import_completeness() {
        // Verify the prelude exposes everything a caller needs for a round trip.
        let _converter: WorkflowConverter = WorkflowConverter::builder()
            .with_endpoint_matching(EndpointMatching::Exact)
            .with_origin_slots(OriginSlots::Fixed)
            .build();
        let _registry: std::sync::Arc<MappingRegistry> = MappingRegistry::shared();
        let _kind = MatchKind::Exact;
        let _errors: Vec<String> = validate(&json!({}));
        let _entry: Option<CatalogEntry> = inspect(&json!({}), &MappingRegistry::new());
        let _result: Result<()> = Ok(());
    }
}
